//! Terminal views
//!
//! - [`AddTodoInput`]: draft input, wired through an explicit `StoreContext`
//! - [`TodoListView`] / [`FilterFooter`]: plain components, wired with `Connect`
//! - [`TodoApp`]: the shell that owns them and subscribes to the store

pub mod add_todo;
pub mod app;
pub mod footer;
pub mod todo_list;

pub use add_todo::AddTodoInput;
pub use app::{Focus, TodoApp};
pub use footer::{footer_props, FilterFooter, FooterSelector};
pub use todo_dispatch::Component;
pub use todo_list::{list_props, ListSelector, TodoListIntent, TodoListProps, TodoListView};
