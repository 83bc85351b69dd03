//! Persistence-owning repositories.
//!
//! # Invariants
//! - The task store is the only writer of the task collection.
//! - Every successful mutation rewrites the full collection.

pub mod task_store;
