//! Todo actions, their wire form, and action creators

use serde::{Deserialize, Serialize};
use todo_dispatch::{Action, ActionSummary};

use crate::filter::VisibilityFilter;
use crate::todo::TodoId;

/// Everything that can happen to the todo state
///
/// Wire form is a JSON object tagged by `type`:
///
/// ```json
/// {"type": "ADD_TODO", "id": 0, "text": "buy milk"}
/// {"type": "TOGGLE_TODO", "id": 0}
/// {"type": "SET_VISIBILITY_FILTER", "filter": "SHOW_COMPLETED"}
/// ```
///
/// Any other `type` decodes to [`TodoAction::Unrecognized`], which every
/// reducer ignores.
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    AddTodo { id: TodoId, text: String },
    ToggleTodo { id: TodoId },
    SetVisibilityFilter { filter: VisibilityFilter },
    #[serde(other)]
    Unrecognized,
}

impl ActionSummary for TodoAction {
    fn summary(&self) -> String {
        match self {
            TodoAction::AddTodo { id, text } => format!("{} {:?}", id, text),
            TodoAction::ToggleTodo { id } => id.to_string(),
            TodoAction::SetVisibilityFilter { filter } => filter.to_string(),
            TodoAction::Unrecognized => String::new(),
        }
    }
}

/// Monotonic source of todo ids; an id is never handed out twice
#[derive(Debug, Clone, Default)]
pub struct TodoIdSequence {
    next: u64,
}

impl TodoIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering from `next`, e.g. after replaying existing todos
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> TodoId {
        let id = TodoId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) returns
    pub fn peek(&self) -> TodoId {
        TodoId(self.next)
    }
}

/// Create a todo with a fresh id from `ids`
pub fn add_todo(ids: &mut TodoIdSequence, text: impl Into<String>) -> TodoAction {
    TodoAction::AddTodo {
        id: ids.next_id(),
        text: text.into(),
    }
}

pub fn toggle_todo(id: TodoId) -> TodoAction {
    TodoAction::ToggleTodo { id }
}

pub fn set_visibility_filter(filter: VisibilityFilter) -> TodoAction {
    TodoAction::SetVisibilityFilter { filter }
}
