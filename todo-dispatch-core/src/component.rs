//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A pure UI component that renders based on props and emits intents
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns intents, never mutates shared state
/// 3. `render` is a pure function of props (plus internal UI state like a cursor)
///
/// Internal UI state (cursor position, text being typed) can be stored in
/// `&mut self`, but data mutations must go through the store. The `Intent`
/// type belongs to the component; [`Connect`](crate::Connect) maps intents
/// to store actions, so a component never needs to name the store's action
/// type.
///
/// # Example
///
/// ```ignore
/// use todo_dispatch::{Component, EventKind, Frame, Rect};
///
/// struct Counter;
///
/// struct CounterProps {
///     count: i32,
/// }
///
/// enum CounterIntent {
///     Increment,
/// }
///
/// impl Component for Counter {
///     type Props<'a> = CounterProps;
///     type Intent = CounterIntent;
///
///     fn handle_event(
///         &mut self,
///         event: &EventKind,
///         _props: Self::Props<'_>,
///     ) -> impl IntoIterator<Item = CounterIntent> {
///         match event.as_key().map(|k| k.code) {
///             Some(KeyCode::Up) => Some(CounterIntent::Increment),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(format!("Count: {}", props.count)), area);
///     }
/// }
/// ```
pub trait Component {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// What the component asks for in response to events
    type Intent;

    /// Handle an event and return intents
    ///
    /// Returns any type implementing `IntoIterator<Item = Self::Intent>`:
    /// - `None` - nothing to do (most common)
    /// - `Some(intent)` - single intent
    /// - `vec![...]` - multiple intents
    ///
    /// Default implementation returns nothing (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Self::Intent> {
        None::<Self::Intent>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
