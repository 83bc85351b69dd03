//! Use-case services for host integrations.
//!
//! # Responsibility
//! - Wire user events to store mutations and re-render.
//! - Keep host layers decoupled from storage details.

pub mod todo_service;
