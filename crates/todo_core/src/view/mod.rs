//! Projection of store state into host-renderable models.
//!
//! # Responsibility
//! - Derive the visible subset from tasks plus transient filter/search state.
//! - Describe rows and inline-edit state without touching any display API.
//!
//! # Invariants
//! - Views never mutate the task store.

pub mod list_view;
