//! Light/dark display preference.
//!
//! # Responsibility
//! - Read and write the persisted theme under its own storage key.
//! - Fall back to the host's color-scheme preference when nothing valid is
//!   stored.
//!
//! # Invariants
//! - Task state never depends on the theme.

use crate::storage::{KeyValueStorage, StorageResult, THEME_KEY};
use log::{info, warn};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Accepts only the exact persisted spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Glyph for the toggle control: it offers the opposite mode.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeController<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> ThemeController<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored preference, or the system preference when none is usable.
    pub fn load(&self, system_prefers_light: bool) -> Theme {
        let fallback = if system_prefers_light {
            Theme::Light
        } else {
            Theme::Dark
        };

        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                info!("event=theme_load module=theme status=fallback reason=unrecognized");
                fallback
            }),
            Ok(None) => fallback,
            Err(err) => {
                warn!("event=theme_load module=theme status=fallback error={err}");
                fallback
            }
        }
    }

    pub fn save(&self, theme: Theme) -> StorageResult<()> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// Flips `current` and persists the result.
    pub fn toggle(&self, current: Theme) -> StorageResult<Theme> {
        let next = current.toggled();
        self.save(next)?;
        Ok(next)
    }
}
