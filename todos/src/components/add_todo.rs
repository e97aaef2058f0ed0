use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use todo_dispatch::{EventKind, Middleware, StoreContext, StoreError};

use crate::action::{add_todo, TodoAction, TodoIdSequence};
use crate::state::AppState;
use crate::todo::TodoId;

const PLACEHOLDER: &str = "What needs to be done?";

/// Single-line input that adds a todo on Enter
///
/// Receives the store as an explicit [`StoreContext`] instead of props and
/// intents: it reads the active count for its title and dispatches
/// `AddTodo` itself. The draft text and cursor are local UI state.
#[derive(Debug, Default)]
pub struct AddTodoInput {
    draft: String,
    /// Cursor position (byte index)
    cursor: usize,
    focused: bool,
    ids: TodoIdSequence,
}

impl AddTodoInput {
    pub fn new(ids: TodoIdSequence) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    fn move_left(&mut self) {
        if let Some((index, _)) = self.draft[..self.cursor].char_indices().next_back() {
            self.cursor = index;
        }
    }

    fn move_right(&mut self) {
        if let Some(c) = self.draft[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, c: char) {
        self.draft.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some((index, _)) = self.draft[..self.cursor].char_indices().next_back() {
            self.draft.remove(index);
            self.cursor = index;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.draft.len() {
            self.draft.remove(self.cursor);
        }
    }

    fn clear(&mut self) {
        self.draft.clear();
        self.cursor = 0;
    }

    /// Edit the draft, or add it as a todo on Enter
    ///
    /// Returns the id of the added todo. Blank drafts are not submitted.
    ///
    /// # Errors
    ///
    /// A rejected dispatch; the draft is kept so nothing typed is lost.
    pub fn handle_event<M: Middleware<TodoAction>>(
        &mut self,
        event: &EventKind,
        ctx: StoreContext<'_, AppState, TodoAction, M>,
    ) -> Result<Option<TodoId>, StoreError> {
        if !self.focused {
            return Ok(None);
        }
        let EventKind::Key(key) = event else {
            return Ok(None);
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => self.cursor = 0,
                KeyCode::Char('e') => self.cursor = self.draft.len(),
                KeyCode::Char('u') => self.clear(),
                _ => {}
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.draft.len(),
            KeyCode::Enter => return self.submit(ctx),
            _ => {}
        }
        Ok(None)
    }

    fn submit<M: Middleware<TodoAction>>(
        &mut self,
        ctx: StoreContext<'_, AppState, TodoAction, M>,
    ) -> Result<Option<TodoId>, StoreError> {
        if self.draft.trim().is_empty() {
            return Ok(None);
        }

        let id = self.ids.peek();
        ctx.dispatch(add_todo(&mut self.ids, self.draft.as_str()))?;
        tracing::info!(%id, "todo added");
        self.clear();
        Ok(Some(id))
    }

    pub fn render<M: Middleware<TodoAction>>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        ctx: StoreContext<'_, AppState, TodoAction, M>,
    ) {
        let (left, total) = ctx.with_state(|state| (state.todos.active_count(), state.todos.len()));

        let block = Block::default()
            .title(format!(" Add todo ({} of {} left) ", left, total))
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });

        let paragraph = if self.draft.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.draft.as_str())
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let column = self.draft[..self.cursor].chars().count() as u16;
            let x = area.x.saturating_add(1).saturating_add(column);
            if x < area.right().saturating_sub(1) {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}
