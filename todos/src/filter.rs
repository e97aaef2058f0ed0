//! Visibility filter state and the visible-todos selector

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::TodoAction;
use crate::todo::{Todo, TodoList};

/// Which todos the list shows
///
/// Stored verbatim: an unrecognised filter string is kept as
/// [`VisibilityFilter::Unknown`] rather than rejected, and the selector
/// decides what to do with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisibilityFilter {
    #[default]
    ShowAll,
    ShowActive,
    ShowCompleted,
    Unknown(String),
}

impl VisibilityFilter {
    /// The recognised filters, in footer order
    pub const KNOWN: [VisibilityFilter; 3] = [
        VisibilityFilter::ShowAll,
        VisibilityFilter::ShowActive,
        VisibilityFilter::ShowCompleted,
    ];

    /// Wire name, e.g. `SHOW_ACTIVE`
    pub fn as_str(&self) -> &str {
        match self {
            VisibilityFilter::ShowAll => "SHOW_ALL",
            VisibilityFilter::ShowActive => "SHOW_ACTIVE",
            VisibilityFilter::ShowCompleted => "SHOW_COMPLETED",
            VisibilityFilter::Unknown(filter) => filter,
        }
    }

    /// Short label for display
    pub fn label(&self) -> &str {
        match self {
            VisibilityFilter::ShowAll => "All",
            VisibilityFilter::ShowActive => "Active",
            VisibilityFilter::ShowCompleted => "Completed",
            VisibilityFilter::Unknown(filter) => filter,
        }
    }

    /// Whether `todo` passes this filter (unknown filters pass everything)
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            VisibilityFilter::ShowAll | VisibilityFilter::Unknown(_) => true,
            VisibilityFilter::ShowActive => !todo.completed,
            VisibilityFilter::ShowCompleted => todo.completed,
        }
    }
}

impl From<String> for VisibilityFilter {
    fn from(filter: String) -> Self {
        match filter.as_str() {
            "SHOW_ALL" => VisibilityFilter::ShowAll,
            "SHOW_ACTIVE" => VisibilityFilter::ShowActive,
            "SHOW_COMPLETED" => VisibilityFilter::ShowCompleted,
            _ => VisibilityFilter::Unknown(filter),
        }
    }
}

impl From<&str> for VisibilityFilter {
    fn from(filter: &str) -> Self {
        Self::from(filter.to_string())
    }
}

impl From<VisibilityFilter> for String {
    fn from(filter: VisibilityFilter) -> Self {
        match filter {
            VisibilityFilter::Unknown(filter) => filter,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next visibility filter: the action's filter, taken as is
pub fn reduce_visibility_filter(
    current: &VisibilityFilter,
    action: &TodoAction,
) -> VisibilityFilter {
    match action {
        TodoAction::SetVisibilityFilter { filter } => filter.clone(),
        _ => current.clone(),
    }
}

/// Todos that pass `filter`, in list order
pub fn visible_todos(todos: &TodoList, filter: &VisibilityFilter) -> Vec<Arc<Todo>> {
    if let VisibilityFilter::Unknown(unknown) = filter {
        tracing::warn!(filter = %unknown, "Unknown visibility filter, showing all todos");
    }
    todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}
