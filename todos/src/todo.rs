//! Todo entities and the todo collection

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::action::TodoAction;

/// Identifier handed out by [`TodoIdSequence`](crate::action::TodoIdSequence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single todo item
///
/// `id` and `text` never change after creation; `completed` only flips
/// through [`TodoAction::ToggleTodo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Ordered, immutable sequence of todos in creation order
///
/// Clones share the same allocation. Reducers build a new list only when
/// something changed, so [`TodoList::ptr_eq`] tells whether an action left
/// the list untouched.
#[derive(Clone, PartialEq)]
pub struct TodoList(Arc<[Arc<Todo>]>);

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Todo>> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Todo>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The todo with `id`, if any
    pub fn get(&self, id: TodoId) -> Option<&Arc<Todo>> {
        self.0.iter().find(|todo| todo.id == id)
    }

    /// Number of todos not yet completed
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|todo| !todo.completed).count()
    }

    /// Whether both lists are the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl fmt::Debug for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl FromIterator<Arc<Todo>> for TodoList {
    fn from_iter<I: IntoIterator<Item = Arc<Todo>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Todo> for TodoList {
    fn from_iter<I: IntoIterator<Item = Todo>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl Serialize for TodoList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|todo| &**todo))
    }
}

/// Next state of a single todo
///
/// `None` stands for a todo that does not exist yet. Adding ignores the
/// current value. Toggling a todo with a different id returns the same
/// `Arc`, so unaffected items stay pointer-equal.
pub fn reduce_todo(current: Option<&Arc<Todo>>, action: &TodoAction) -> Option<Arc<Todo>> {
    match action {
        TodoAction::AddTodo { id, text } => Some(Arc::new(Todo::new(*id, text.clone()))),
        TodoAction::ToggleTodo { id } => current.map(|todo| {
            if todo.id != *id {
                return Arc::clone(todo);
            }
            Arc::new(Todo {
                completed: !todo.completed,
                ..Todo::clone(todo)
            })
        }),
        _ => current.cloned(),
    }
}

/// Next state of the todo collection
pub fn reduce_todos(current: &TodoList, action: &TodoAction) -> TodoList {
    match action {
        TodoAction::AddTodo { .. } => current
            .iter()
            .cloned()
            .chain(reduce_todo(None, action))
            .collect(),
        TodoAction::ToggleTodo { .. } => current
            .iter()
            .filter_map(|todo| reduce_todo(Some(todo), action))
            .collect(),
        _ => current.clone(),
    }
}
