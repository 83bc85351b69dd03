//! Command line surface.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use todo_core::FilterMode;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Local task list")]
pub struct Cli {
    /// Directory holding the task database and logs.
    #[arg(long, env = "TODO_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TODO_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task at the top of the list.
    Add { text: String },
    /// Show tasks, optionally filtered and searched.
    List {
        #[arg(long, default_value = "all")]
        filter: FilterMode,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Flip completion of a task.
    Toggle { id: String },
    /// Replace the text of a task; blank text keeps the current one.
    Edit { id: String, text: String },
    /// Delete a task.
    Rm { id: String },
    /// Delete every completed task.
    ClearCompleted,
    /// Show or flip the display theme.
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Toggle { .. } => "toggle",
            Self::Edit { .. } => "edit",
            Self::Rm { .. } => "rm",
            Self::ClearCompleted => "clear-completed",
            Self::Theme { .. } => "theme",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
}
