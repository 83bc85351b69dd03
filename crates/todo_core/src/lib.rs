//! Core domain logic for the local task list.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod theme;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_store::{StoreError, StoreResult, TaskStore};
pub use service::todo_service::{ListEvent, TodoService};
pub use storage::{
    KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult, TASKS_KEY,
    THEME_KEY,
};
pub use theme::{Theme, ThemeController};
pub use view::list_view::{
    render, visible, EditSession, FilterMode, RenderModel, RowAction, RowDescriptor, RowState,
    UnknownFilterMode,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
