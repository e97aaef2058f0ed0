use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use todo_dispatch::{EventKind, MapState};

use super::Component;
use crate::filter::VisibilityFilter;
use crate::state::AppState;

/// Project the active filter out of the application state
pub fn footer_props(state: &AppState) -> &VisibilityFilter {
    &state.visibility_filter
}

/// [`footer_props`] as a `Connect` state projection
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterSelector;

impl MapState<AppState, FilterFooter> for FooterSelector {
    fn map<'s>(&self, state: &'s AppState) -> &'s VisibilityFilter {
        footer_props(state)
    }
}

/// Filter links: `1` all, `2` active, `3` completed
///
/// The active filter is highlighted and selecting it again does nothing.
#[derive(Debug, Default)]
pub struct FilterFooter;

impl FilterFooter {
    fn filter_for_key(code: KeyCode) -> Option<VisibilityFilter> {
        match code {
            KeyCode::Char('1') => Some(VisibilityFilter::ShowAll),
            KeyCode::Char('2') => Some(VisibilityFilter::ShowActive),
            KeyCode::Char('3') => Some(VisibilityFilter::ShowCompleted),
            _ => None,
        }
    }
}

impl Component for FilterFooter {
    type Props<'a> = &'a VisibilityFilter;
    type Intent = VisibilityFilter;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = VisibilityFilter> {
        event
            .as_key()
            .and_then(|key| Self::filter_for_key(key.code))
            .filter(|filter| filter != props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = vec![Span::styled("Show: ", Style::default().fg(Color::DarkGray))];

        for (index, filter) in VisibilityFilter::KNOWN.iter().enumerate() {
            let style = if filter == props {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            if index > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{}] {}", index + 1, filter.label()), style));
        }

        if let VisibilityFilter::Unknown(unknown) = props {
            spans.push(Span::styled(
                format!("  (unknown filter {:?})", unknown),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_dispatch::testing::{into_event, char_key, RenderHarness};

    fn intents(current: &VisibilityFilter, c: char) -> Vec<VisibilityFilter> {
        FilterFooter
            .handle_event(&into_event(char_key(c)), current)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_number_keys_select_filters() {
        let current = VisibilityFilter::ShowAll;
        assert_eq!(intents(&current, '2'), vec![VisibilityFilter::ShowActive]);
        assert_eq!(intents(&current, '3'), vec![VisibilityFilter::ShowCompleted]);
        assert!(intents(&current, 'x').is_empty());
    }

    #[test]
    fn test_active_filter_is_not_reselected() {
        assert!(intents(&VisibilityFilter::ShowActive, '2').is_empty());
    }

    #[test]
    fn test_render_lists_every_filter() {
        let mut render = RenderHarness::new(60, 1);
        let output = render.render_to_string_plain(|frame| {
            FilterFooter.render(frame, frame.area(), &VisibilityFilter::ShowCompleted);
        });
        assert_eq!(output, "Show: [1] All  [2] Active  [3] Completed");
    }
}
