//! Test utilities for todo-dispatch applications
//!
//! - [`key`]: Create a `KeyEvent` from a string (e.g., `key("ctrl+c")`)
//! - [`type_text`]: One key event per character, for driving text inputs
//! - [`RenderHarness`]: Render into a `TestBackend` and read the screen back as text
//! - [`ListenerProbe`] / [`StateHistory`]: observe store notifications
//! - Assertion macros for verifying emitted intents or actions
//!
//! # Example
//!
//! ```ignore
//! use todo_dispatch::testing::{StateHistory, key_event};
//!
//! let store = Store::new(AppState::default(), AppState::reducer());
//! let history = StateHistory::attach(&store);
//!
//! store.dispatch(add_todo(&mut ids, "buy milk"))?;
//! assert_eq!(history.len(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

use crate::event::EventKind;
use crate::store::{Middleware, Store, Subscription};
use crate::Action;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Parse strings like `"q"`, `"enter"`, `"ctrl+c"`, `"shift+tab"`
fn parse_key(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut parts: Vec<&str> = s.split('+').collect();
    // A literal "+" key splits into two empty parts
    let last = if s.ends_with("++") || s == "+" {
        parts.truncate(parts.len().saturating_sub(2));
        "+"
    } else {
        parts.pop()?
    };

    for modifier in parts {
        match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match last.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
            modifiers.remove(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "f12" => KeyCode::F(12),
        _ => {
            let mut chars = last.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(press(code, modifiers))
}

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use todo_dispatch_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("q");
/// assert_eq!(k.code, KeyCode::Char('q'));
///
/// let k = key("ctrl+c");
/// assert_eq!(k.code, KeyCode::Char('c'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
///
/// let k = key("shift+tab");
/// assert_eq!(k.code, KeyCode::BackTab);
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::empty())
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    press(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Wrap a `KeyEvent` as an [`EventKind`].
pub fn into_event(key_event: KeyEvent) -> EventKind {
    EventKind::Key(key_event)
}

/// Create an [`EventKind`] from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key_event(s: &str) -> EventKind {
    into_event(key(s))
}

/// One key event per character of `text`.
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| into_event(char_key(c))).collect()
}

/// Convert a buffer to plain text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    if width == 0 {
        return String::new();
    }

    buffer
        .content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders into an in-memory terminal for assertions on screen content
///
/// ```ignore
/// let mut render = RenderHarness::new(40, 10);
/// let output = render.render_to_string_plain(|frame| {
///     component.render(frame, frame.area(), props);
/// });
/// assert!(output.contains("buy milk"));
/// ```
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render(&mut self, f: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(f)
            .unwrap_or_else(|e| panic!("failed to draw test frame: {}", e));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return the screen as plain text.
    pub fn render_to_string_plain(&mut self, f: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(f))
    }
}

/// Counts listener invocations
#[derive(Debug, Clone, Default)]
pub struct ListenerProbe {
    calls: Rc<Cell<usize>>,
}

impl ListenerProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that bumps this probe's counter
    pub fn listener(&self) -> impl Fn() + 'static {
        let calls = Rc::clone(&self.calls);
        move || calls.set(calls.get() + 1)
    }

    /// Subscribe a counting listener to `store`
    pub fn attach<S, A: Action, M: Middleware<A>>(&self, store: &Store<S, A, M>) -> Subscription {
        store.subscribe(self.listener())
    }

    /// Invocations so far
    pub fn count(&self) -> usize {
        self.calls.get()
    }

    /// Return the count and reset it to zero
    pub fn take(&self) -> usize {
        self.calls.replace(0)
    }
}

/// Records a state snapshot on every store notification
pub struct StateHistory<S> {
    states: Rc<RefCell<Vec<S>>>,
    subscription: Subscription,
}

impl<S: Clone + 'static> StateHistory<S> {
    /// Subscribe to `store` and start recording
    pub fn attach<A: Action, M: Middleware<A> + 'static>(store: &Store<S, A, M>) -> Self {
        let states = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&states);
        let reader = store.downgrade();
        let subscription = store.subscribe(move || {
            if let Some(store) = reader.upgrade() {
                recorded.borrow_mut().push(store.get_state());
            }
        });
        Self {
            states,
            subscription,
        }
    }

    /// All recorded snapshots, oldest first
    pub fn states(&self) -> Vec<S> {
        self.states.borrow().clone()
    }

    /// The most recent snapshot
    pub fn last(&self) -> Option<S> {
        self.states.borrow().last().cloned()
    }

    /// Number of notifications seen
    pub fn len(&self) -> usize {
        self.states.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.borrow().is_empty()
    }

    /// Stop recording and return what was captured
    pub fn detach(self) -> Vec<S> {
        self.subscription.unsubscribe();
        self.states.take()
    }
}

/// Assert that an item matching a pattern was emitted.
///
/// # Example
///
/// ```ignore
/// let intents: Vec<_> = component.handle_event(&event, props).into_iter().collect();
/// assert_emitted!(intents, TodoListIntent::Toggle(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected item matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no item matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected item matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first item matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many items match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
