//! Todo list state and terminal UI built on todo-dispatch
//!
//! - [`todo`]: todo entities and the collection reducer
//! - [`filter`]: visibility filter reducer and the visible-todos selector
//! - [`state`]: the combined [`AppState`] and store construction
//! - [`action`]: typed actions, their JSON form, and action creators
//! - [`components`]: terminal views and the application shell
//! - [`replay`]: replaying recorded actions from JSON lines

pub mod action;
pub mod components;
pub mod filter;
pub mod replay;
pub mod state;
pub mod todo;

pub use action::{add_todo, set_visibility_filter, toggle_todo, TodoAction, TodoIdSequence};
pub use filter::{reduce_visibility_filter, visible_todos, VisibilityFilter};
pub use replay::{encode_state, replay_actions, ReplayError};
pub use state::{new_store, AppState, TodoStore};
pub use todo::{reduce_todo, reduce_todos, Todo, TodoId, TodoList};
