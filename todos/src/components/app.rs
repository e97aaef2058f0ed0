use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use todo_dispatch::debug::ActionLogWidget;
use todo_dispatch::{Connect, EventKind, StoreContext, StoreError, Subscription};

use super::{
    AddTodoInput, FilterFooter, FooterSelector, ListSelector, TodoListIntent, TodoListView,
};
use crate::action::{set_visibility_filter, toggle_todo, TodoAction, TodoIdSequence};
use crate::filter::VisibilityFilter;
use crate::state::{AppState, TodoStore};

type ListIntentMap = fn(TodoListIntent) -> Option<TodoAction>;
type FooterIntentMap = fn(VisibilityFilter) -> Option<TodoAction>;

fn list_intent(intent: TodoListIntent) -> Option<TodoAction> {
    match intent {
        TodoListIntent::Toggle(id) => Some(toggle_todo(id)),
    }
}

fn footer_intent(filter: VisibilityFilter) -> Option<TodoAction> {
    Some(set_visibility_filter(filter))
}

/// Which part of the screen receives key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// Application shell
///
/// Owns the views and wires each of them to the store differently:
/// - the shell subscribes a listener that marks the screen dirty
/// - the add-todo input gets an explicit [`StoreContext`]
/// - the list and footer are [`Connect`] bindings
///
/// Tab switches focus between the input and the list. From the list,
/// `q` or Esc quits, and Ctrl+C quits from anywhere. F12 toggles the
/// action log panel.
pub struct TodoApp {
    store: TodoStore,
    dirty: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
    input: AddTodoInput,
    list: Connect<TodoListView, AppState, TodoAction, ListSelector, ListIntentMap>,
    footer: Connect<FilterFooter, AppState, TodoAction, FooterSelector, FooterIntentMap>,
    focus: Focus,
    show_log: bool,
    should_quit: bool,
}

impl TodoApp {
    pub fn new(store: TodoStore) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = store.subscribe(move || flag.set(true));

        let mut app = Self {
            store,
            dirty,
            subscription: Some(subscription),
            input: AddTodoInput::new(TodoIdSequence::new()),
            list: Connect::new(TodoListView::new(), ListSelector, list_intent as ListIntentMap),
            footer: Connect::new(FilterFooter, FooterSelector, footer_intent as FooterIntentMap),
            focus: Focus::Input,
            show_log: false,
            should_quit: false,
        };
        app.set_focus(Focus::Input);
        app
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    /// Return whether a redraw is due, and reset the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input.set_focused(focus == Focus::Input);
        self.list.inner_mut().set_focused(focus == Focus::List);
    }

    /// Route one terminal event
    ///
    /// # Errors
    ///
    /// A dispatch rejected by the store. The event is dropped.
    pub fn handle_event(&mut self, event: &EventKind) -> Result<(), StoreError> {
        if event.is_interrupt() {
            self.should_quit = true;
            return Ok(());
        }

        let key = match event {
            EventKind::Key(key) => key,
            EventKind::Resize(..) => {
                self.dirty.set(true);
                return Ok(());
            }
        };

        // Cursor moves and typing never reach the store, so mark dirty here
        self.dirty.set(true);

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                let next = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
                self.set_focus(next);
                return Ok(());
            }
            KeyCode::F(12) => {
                self.show_log = !self.show_log;
                return Ok(());
            }
            _ => {}
        }

        let ctx = StoreContext::new(&self.store);
        match self.focus {
            Focus::Input => {
                if key.code == KeyCode::Esc {
                    self.set_focus(Focus::List);
                    return Ok(());
                }
                self.input.handle_event(event, ctx)?;
            }
            Focus::List => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                    return Ok(());
                }
                self.list.handle_event(event, ctx)?;
                self.footer.handle_event(event, ctx)?;
            }
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let main = if self.show_log {
            let [main, log_area] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(area);
            self.store.inspect_middleware(|middleware| {
                if let Some(log) = middleware.log() {
                    frame.render_widget(ActionLogWidget::new(log), log_area);
                }
            });
            main
        } else {
            area
        };

        let [input_area, list_area, footer_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(main);

        let ctx = StoreContext::new(&self.store);
        self.input.render(frame, input_area, ctx);
        self.list.render(frame, list_area, ctx);
        self.footer.render(frame, footer_area, ctx);
        self.render_help(frame, help_area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let text = match self.focus {
            Focus::Input => "Enter: add  Tab: list  Esc: list  F12: log  Ctrl+C: quit",
            Focus::List => "j/k: move  Space: toggle  1-3: filter  Tab: input  F12: log  q: quit",
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

impl Drop for TodoApp {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
