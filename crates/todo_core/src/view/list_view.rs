//! List view projection.
//!
//! `render` is a pure function from the full task collection and transient
//! view state to a [`RenderModel`]. Hosts rebuild every row from the model on
//! each render; there is no incremental patching.

use crate::model::task::{Task, TaskId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Label on the completion toggle affordance.
pub const TOGGLE_LABEL: &str = "Toggle complete";

/// Completion filter applied before search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterMode(pub String);

impl Display for UnknownFilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter mode `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for UnknownFilterMode {}

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownFilterMode(value.to_string())),
        }
    }
}

/// Affordances every row exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [Self::Toggle, Self::Edit, Self::Delete];

    pub fn label(self) -> &'static str {
        match self {
            Self::Toggle => TOGGLE_LABEL,
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

/// The single in-progress inline edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: TaskId,
    draft: String,
}

impl EditSession {
    /// Starts editing `task`, pre-filled with its current text.
    pub fn begin(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            draft: task.text.clone(),
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Cursor position at the end of the draft, in characters.
    pub fn cursor(&self) -> usize {
        self.draft.chars().count()
    }

    /// Ends the session, yielding the id and the text to commit.
    pub fn into_commit(self) -> (TaskId, String) {
        (self.id, self.draft)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    Display,
    /// Text display replaced by a focused field holding `draft`.
    Editing { draft: String, cursor: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub state: RowState,
    pub actions: [RowAction; 3],
}

impl RowDescriptor {
    pub fn is_editing(&self) -> bool {
        matches!(self.state, RowState::Editing { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub rows: Vec<RowDescriptor>,
    pub empty_state_visible: bool,
    /// Open tasks in the full collection, independent of filter and search.
    pub remaining_count: usize,
}

/// Builds the render model for one pass.
pub fn render(
    tasks: &[Task],
    filter: FilterMode,
    query: &str,
    editing: Option<&EditSession>,
) -> RenderModel {
    let matcher = SearchMatcher::new(query);
    let rows: Vec<RowDescriptor> = visible_tasks(tasks, filter, &matcher)
        .map(|task| row_for(task, editing))
        .collect();

    RenderModel {
        empty_state_visible: rows.is_empty(),
        remaining_count: tasks.iter().filter(|task| !task.completed).count(),
        rows,
    }
}

/// Tasks passing both the filter and the search query, in store order.
pub fn visible<'a>(tasks: &'a [Task], filter: FilterMode, query: &str) -> Vec<&'a Task> {
    let matcher = SearchMatcher::new(query);
    visible_tasks(tasks, filter, &matcher).collect()
}

fn visible_tasks<'t, 'm>(
    tasks: &'t [Task],
    filter: FilterMode,
    matcher: &'m SearchMatcher,
) -> impl Iterator<Item = &'t Task> + 'm
where
    't: 'm,
{
    tasks
        .iter()
        .filter(move |task| filter.matches(task) && matcher.matches(&task.text))
}

fn row_for(task: &Task, editing: Option<&EditSession>) -> RowDescriptor {
    let state = match editing {
        Some(session) if session.id() == &task.id => RowState::Editing {
            draft: session.draft().to_string(),
            cursor: session.cursor(),
        },
        _ => RowState::Display,
    };
    RowDescriptor {
        id: task.id.clone(),
        text: task.text.clone(),
        completed: task.completed,
        state,
        actions: RowAction::ALL,
    }
}

/// Case-insensitive literal substring matcher; an empty query matches all.
///
/// Both sides are compared in full Unicode lowercase, so multi-char
/// lowercase mappings such as `İ` -> `i̇` match either spelling.
struct SearchMatcher {
    needle: Option<String>,
}

impl SearchMatcher {
    fn new(query: &str) -> Self {
        let query = query.trim();
        Self {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }
}
