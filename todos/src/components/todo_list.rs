use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use todo_dispatch::{EventKind, MapState};

use super::Component;
use crate::filter::{visible_todos, VisibilityFilter};
use crate::state::AppState;
use crate::todo::{TodoId, TodoList};

/// Props for [`TodoListView`]
pub struct TodoListProps<'a> {
    pub todos: &'a TodoList,
    pub filter: &'a VisibilityFilter,
}

/// Project the list props out of the application state
pub fn list_props(state: &AppState) -> TodoListProps<'_> {
    TodoListProps {
        todos: &state.todos,
        filter: &state.visibility_filter,
    }
}

/// [`list_props`] as a `Connect` state projection
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSelector;

impl MapState<AppState, TodoListView> for ListSelector {
    fn map<'s>(&self, state: &'s AppState) -> TodoListProps<'s> {
        list_props(state)
    }
}

/// What the list asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoListIntent {
    Toggle(TodoId),
}

/// The filtered todo list with a selection cursor
///
/// j/k or the arrow keys move the cursor, Space or Enter toggles the
/// selected todo.
#[derive(Debug, Default)]
pub struct TodoListView {
    selected: usize,
    focused: bool,
}

impl TodoListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Cursor position within the visible todos
    pub fn selected(&self) -> usize {
        self.selected
    }

    fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

impl Component for TodoListView {
    type Props<'a> = TodoListProps<'a>;
    type Intent = TodoListIntent;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = TodoListIntent> {
        if !self.focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        let visible = visible_todos(props.todos, props.filter);
        self.clamp(visible.len());
        if visible.is_empty() {
            return None;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(visible.len() - 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = visible.len() - 1;
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => visible
                .get(self.selected)
                .map(|todo| TodoListIntent::Toggle(todo.id)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let visible = visible_todos(props.todos, props.filter);
        self.clamp(visible.len());

        let block = Block::default()
            .title(format!(" Todos ({}) ", props.filter.label()))
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });

        if visible.is_empty() {
            let empty = Paragraph::new("Nothing to show")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|todo| {
                let (mark, text_style) = if todo.completed {
                    (
                        "[x] ",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::raw(mark),
                    Span::styled(todo.text.as_str(), text_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("> ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));

        let mut state = ListState::default().with_selected(self.focused.then_some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
