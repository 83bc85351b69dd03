//! Event handler between a host UI and the task store.
//!
//! # Responsibility
//! - Own transient view state: filter, search query, inline edit session.
//! - Turn each user event into at most one store mutation, then re-render.
//!
//! # Invariants
//! - View state is never persisted.
//! - Every event ends with a fresh full render; rows are never patched.
//! - At most one row is in edit mode. Any event outside the edit flow ends
//!   the session uncommitted, since the re-render rebuilds every row.

use crate::model::task::TaskId;
use crate::repo::task_store::{StoreResult, TaskStore};
use crate::storage::KeyValueStorage;
use crate::view::list_view::{self, EditSession, FilterMode, RenderModel};

/// User interactions a host forwards to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// New-task form submitted.
    Submit(String),
    Toggle(TaskId),
    Delete(TaskId),
    /// Text double-clicked or edit control pressed.
    BeginEdit(TaskId),
    UpdateDraft(String),
    /// Edit field lost focus or the accept key was pressed.
    CommitEdit,
    /// Cancel key pressed in the edit field.
    CancelEdit,
    SetFilter(FilterMode),
    SetSearch(String),
    ClearCompleted,
}

impl ListEvent {
    fn is_edit_flow(&self) -> bool {
        matches!(
            self,
            Self::BeginEdit(_) | Self::UpdateDraft(_) | Self::CommitEdit | Self::CancelEdit
        )
    }
}

pub struct TodoService<S: KeyValueStorage> {
    store: TaskStore<S>,
    filter: FilterMode,
    search: String,
    editing: Option<EditSession>,
}

impl<S: KeyValueStorage> TodoService<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            filter: FilterMode::default(),
            search: String::new(),
            editing: None,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Current projection of store and view state.
    pub fn render(&self) -> RenderModel {
        list_view::render(
            self.store.tasks(),
            self.filter,
            &self.search,
            self.editing.as_ref(),
        )
    }

    /// Applies one event and returns the resulting render.
    ///
    /// A persistence error is returned after view state has been updated; the
    /// store keeps the in-memory mutation.
    pub fn dispatch(&mut self, event: ListEvent) -> StoreResult<RenderModel> {
        self.apply(event)?;
        Ok(self.render())
    }

    fn apply(&mut self, event: ListEvent) -> StoreResult<()> {
        if !event.is_edit_flow() {
            self.editing = None;
        }
        match event {
            ListEvent::Submit(text) => {
                if text.trim().is_empty() {
                    return Ok(());
                }
                self.store.add(&text).map(|_| ())
            }
            ListEvent::Toggle(id) => self.store.toggle(&id),
            ListEvent::Delete(id) => self.store.remove(&id),
            ListEvent::BeginEdit(id) => {
                if let Some(task) = self.store.get(&id) {
                    self.editing = Some(EditSession::begin(task));
                }
                Ok(())
            }
            ListEvent::UpdateDraft(draft) => {
                if let Some(session) = self.editing.as_mut() {
                    session.set_draft(draft);
                }
                Ok(())
            }
            ListEvent::CommitEdit => match self.editing.take() {
                Some(session) => {
                    let (id, draft) = session.into_commit();
                    self.store.edit(&id, &draft)
                }
                None => Ok(()),
            },
            ListEvent::CancelEdit => {
                self.editing = None;
                Ok(())
            }
            ListEvent::SetFilter(filter) => {
                self.filter = filter;
                Ok(())
            }
            ListEvent::SetSearch(query) => {
                self.search = query;
                Ok(())
            }
            ListEvent::ClearCompleted => self.store.clear_completed(),
        }
    }
}
