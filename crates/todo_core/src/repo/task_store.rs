//! Task store: the single owner of the task collection.
//!
//! # Responsibility
//! - Hold the ordered task collection for the session.
//! - Apply every mutation and rewrite the full collection to storage.
//! - Load the persisted collection once at construction.
//!
//! # Invariants
//! - Ids are unique; `text` is never blank.
//! - Order is newest-first insertion order; only `add` changes positions.
//! - In-memory state is the source of truth even when a write fails.
//! - Unknown ids and blank text are silent no-ops, never errors.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::storage::{KeyValueStorage, StorageError, TASKS_KEY};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to write the collection back to storage.
///
/// The mutation that triggered the write has already been applied in memory.
#[derive(Debug)]
pub enum StoreError {
    Persist(StorageError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist tasks: {err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Persist(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Why a persisted payload was discarded during load.
#[derive(Debug)]
enum LoadError {
    Read(StorageError),
    Decode(serde_json::Error),
    Invalid(TaskValidationError),
    DuplicateId(TaskId),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id `{id}`"),
        }
    }
}

/// Ordered task collection persisted through `S`.
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Loads the persisted collection.
    ///
    /// Missing or unusable data yields an empty store; unusable data is
    /// reported with a warning and left in storage until the next write.
    pub fn load(storage: S) -> Self {
        let tasks = match read_tasks(&storage) {
            Ok(Some(tasks)) => {
                info!(
                    "event=tasks_load module=store status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Ok(None) => {
                info!("event=tasks_load module=store status=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=store status=fallback error_code=tasks_unreadable error={err}"
                );
                Vec::new()
            }
        };
        Self { storage, tasks }
    }

    /// Tasks in display order (newest first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed, across the whole collection.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// Adds a task at the front.
    ///
    /// Returns `Ok(None)` without touching storage when `text` is blank.
    pub fn add(&mut self, text: &str) -> StoreResult<Option<TaskId>> {
        let Some(task) = Task::new(text) else {
            return Ok(None);
        };
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.persist("add")?;
        Ok(Some(id))
    }

    /// Removes the task with `id`; persists even when nothing matched.
    pub fn remove(&mut self, id: &TaskId) -> StoreResult<()> {
        self.tasks.retain(|task| &task.id != id);
        self.persist("remove")
    }

    /// Flips completion of the task with `id`. Unknown ids write nothing.
    pub fn toggle(&mut self, id: &TaskId) -> StoreResult<()> {
        let Some(task) = self.find_mut(id) else {
            return Ok(());
        };
        task.completed = !task.completed;
        self.persist("toggle")
    }

    /// Replaces the text of the task with `id`.
    ///
    /// Blank `new_text` keeps the current text but still persists. Unknown ids
    /// write nothing.
    pub fn edit(&mut self, id: &TaskId, new_text: &str) -> StoreResult<()> {
        let Some(task) = self.find_mut(id) else {
            return Ok(());
        };
        let trimmed = new_text.trim();
        if !trimmed.is_empty() {
            task.text = trimmed.to_string();
        }
        self.persist("edit")
    }

    /// Removes every completed task, keeping the order of the rest.
    pub fn clear_completed(&mut self) -> StoreResult<()> {
        self.tasks.retain(|task| !task.completed);
        self.persist("clear_completed")
    }

    fn find_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    fn persist(&self, operation: &'static str) -> StoreResult<()> {
        let result = serde_json::to_string(&self.tasks)
            .map_err(StoreError::from)
            .and_then(|payload| {
                self.storage
                    .set(TASKS_KEY, &payload)
                    .map_err(StoreError::from)
            });

        if let Err(err) = &result {
            error!(
                "event=tasks_persist module=store status=error op={operation} count={} error={err}",
                self.tasks.len()
            );
        }
        result
    }
}

fn read_tasks(storage: &impl KeyValueStorage) -> Result<Option<Vec<Task>>, LoadError> {
    let Some(raw) = storage.get(TASKS_KEY).map_err(LoadError::Read)? else {
        return Ok(None);
    };
    let tasks: Vec<Task> = serde_json::from_str(&raw).map_err(LoadError::Decode)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        task.validate().map_err(LoadError::Invalid)?;
        if !seen.insert(&task.id) {
            return Err(LoadError::DuplicateId(task.id.clone()));
        }
    }
    Ok(Some(tasks))
}
