//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Task text is never blank once it reaches the store.

pub mod task;
