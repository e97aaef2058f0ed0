//! Debug widgets

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use super::action_logger::ActionLog;

/// Longest summary shown before truncation
const MAX_SUMMARY_CHARS: usize = 60;

/// Style configuration for action log rendering
#[derive(Debug, Clone)]
pub struct ActionLogStyle {
    /// Style for the header row
    pub header: Style,
    /// Style for sequence numbers
    pub sequence: Style,
    /// Style for action names
    pub name: Style,
    /// Style for action summaries
    pub summary: Style,
    /// Style for the changed marker and elapsed time
    pub meta: Style,
    /// Border style of the surrounding block
    pub border: Style,
}

impl Default for ActionLogStyle {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sequence: Style::default().fg(Color::DarkGray),
            name: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            summary: Style::default().fg(Color::White),
            meta: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Renders the newest entries of an [`ActionLog`], newest at the top
///
/// Columns: sequence, changed marker (`*`/`-`), action name, summary, elapsed.
pub struct ActionLogWidget<'a> {
    log: &'a ActionLog,
    style: ActionLogStyle,
    title: &'a str,
}

impl<'a> ActionLogWidget<'a> {
    /// Create a new action log widget
    pub fn new(log: &'a ActionLog) -> Self {
        Self {
            log,
            style: ActionLogStyle::default(),
            title: " Actions ",
        }
    }

    /// Set the style configuration
    pub fn style(mut self, style: ActionLogStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the block title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

impl Widget for ActionLogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.style.border);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width < 24 {
            return;
        }

        // One row is taken by the header
        let visible_rows = inner.height.saturating_sub(1) as usize;

        let header = Row::new(vec![
            Cell::from("#").style(self.style.header),
            Cell::from("").style(self.style.header),
            Cell::from("Action").style(self.style.header),
            Cell::from("Summary").style(self.style.header),
            Cell::from("Elapsed").style(self.style.header),
        ]);

        let rows: Vec<Row> = self
            .log
            .recent(visible_rows)
            .map(|entry| {
                Row::new(vec![
                    Cell::from(entry.sequence.to_string()).style(self.style.sequence),
                    Cell::from(entry.change_marker().to_string()).style(self.style.meta),
                    Cell::from(entry.name).style(self.style.name),
                    Cell::from(truncate(&entry.summary, MAX_SUMMARY_CHARS))
                        .style(self.style.summary),
                    Cell::from(entry.elapsed_display()).style(self.style.meta),
                ])
            })
            .collect();

        let constraints = [
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(20),
            Constraint::Min(10),
            Constraint::Length(7),
        ];

        Table::new(rows, constraints)
            .header(header)
            .column_spacing(1)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{ActionLogConfig, ActionLoggerConfig};
    use crate::testing::buffer_to_string_plain;

    #[derive(Clone, Debug)]
    struct Rename(&'static str);

    impl crate::Action for Rename {
        fn name(&self) -> &'static str {
            "Rename"
        }
    }

    impl crate::ActionSummary for Rename {
        fn summary(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_renders_newest_first() {
        let mut log = ActionLog::new(ActionLogConfig::new(10, ActionLoggerConfig::default()));
        let first = log.log(&Rename("first")).unwrap();
        log.mark_applied(first, true);
        log.log(&Rename("second"));

        let area = Rect::new(0, 0, 70, 6);
        let mut buffer = Buffer::empty(area);
        ActionLogWidget::new(&log).render(area, &mut buffer);

        let text = buffer_to_string_plain(&buffer);
        let second = text.find("second").unwrap();
        let first = text.find("first").unwrap();
        assert!(text.contains("Actions"));
        assert!(second < first);
    }

    #[test]
    fn test_too_small_area_renders_only_block() {
        let log = ActionLog::default();
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        ActionLogWidget::new(&log).render(area, &mut buffer);
        assert!(!buffer_to_string_plain(&buffer).contains('#'));
    }
}
