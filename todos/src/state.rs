//! Combined application state and store construction

use serde::Serialize;
use todo_dispatch::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
use todo_dispatch::{CombinedReducer, Store};

use crate::action::TodoAction;
use crate::filter::{reduce_visibility_filter, VisibilityFilter};
use crate::todo::{reduce_todos, TodoList};

/// The whole application state
///
/// Both fields are reduced independently on every action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, CombinedReducer)]
#[serde(rename_all = "camelCase")]
#[reducer(action = "TodoAction")]
pub struct AppState {
    #[reducer(with = "reduce_todos")]
    pub todos: TodoList,
    #[reducer(with = "reduce_visibility_filter")]
    pub visibility_filter: VisibilityFilter,
}

impl AppState {
    /// Empty todo list with the given filter
    pub fn with_filter(visibility_filter: VisibilityFilter) -> Self {
        Self {
            visibility_filter,
            ..Self::default()
        }
    }
}

/// Store used by the todo UI: state plus action logging
pub type TodoStore = Store<AppState, TodoAction, ActionLoggerMiddleware>;

/// Entries kept in the in-memory action log
pub const ACTION_LOG_CAPACITY: usize = 200;

/// Build the application store around `initial`
pub fn new_store(initial: AppState, filter: ActionLoggerConfig) -> TodoStore {
    let middleware =
        ActionLoggerMiddleware::with_log(ActionLogConfig::new(ACTION_LOG_CAPACITY, filter));
    Store::with_middleware(initial, AppState::reducer(), middleware)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{add_todo, set_visibility_filter, TodoIdSequence};

    #[test]
    fn test_filter_change_keeps_todo_list() {
        let mut ids = TodoIdSequence::new();
        let state = AppState::reduce(&AppState::default(), &add_todo(&mut ids, "a"));
        let next = AppState::reduce(
            &state,
            &set_visibility_filter(VisibilityFilter::ShowCompleted),
        );
        assert!(next.todos.ptr_eq(&state.todos));
        assert_eq!(next.visibility_filter, VisibilityFilter::ShowCompleted);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "todos": [], "visibilityFilter": "SHOW_ALL" })
        );
    }

    #[test]
    fn test_new_store_logs_actions() {
        let store = new_store(AppState::default(), ActionLoggerConfig::default());
        let mut ids = TodoIdSequence::new();
        store.dispatch(add_todo(&mut ids, "a")).unwrap();

        let logged = store.inspect_middleware(|m| m.log().map(|log| log.len()));
        assert_eq!(logged, Some(1));
    }
}
