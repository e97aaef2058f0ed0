//! Binding components to a store
//!
//! Two wiring styles live here:
//!
//! - [`StoreContext`]: an explicit capability handed down the render and
//!   event call chain, so a component can read state or dispatch without
//!   reaching for anything global.
//! - [`Connect`]: a binder built from a state projection, an intent
//!   projection and an inner component. The projection pair decides what
//!   the component sees and what its intents become; the component itself
//!   stays unaware of the store.

use std::fmt;
use std::marker::PhantomData;

use ratatui::{layout::Rect, Frame};

use crate::component::Component;
use crate::error::StoreError;
use crate::event::EventKind;
use crate::store::{Middleware, NoopMiddleware, Store};
use crate::Action;

/// Borrowed access to a store, passed explicitly to whoever needs it
pub struct StoreContext<'a, S, A: Action, M: Middleware<A> = NoopMiddleware> {
    store: &'a Store<S, A, M>,
}

impl<S, A: Action, M: Middleware<A>> Clone for StoreContext<'_, S, A, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A: Action, M: Middleware<A>> Copy for StoreContext<'_, S, A, M> {}

impl<'a, S, A: Action, M: Middleware<A>> StoreContext<'a, S, A, M> {
    pub fn new(store: &'a Store<S, A, M>) -> Self {
        Self { store }
    }

    /// The underlying store handle
    pub fn store(&self) -> &'a Store<S, A, M> {
        self.store
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.store.with_state(f)
    }

    /// Dispatch an action to the store
    ///
    /// # Errors
    ///
    /// Whatever [`Store::dispatch`] returns.
    pub fn dispatch(&self, action: A) -> Result<bool, StoreError>
    where
        S: PartialEq,
    {
        self.store.dispatch(action)
    }
}

impl<'a, S, A: Action, M: Middleware<A>> From<&'a Store<S, A, M>> for StoreContext<'a, S, A, M> {
    fn from(store: &'a Store<S, A, M>) -> Self {
        Self::new(store)
    }
}

/// Projects a component's props out of the store state
///
/// Implemented by a (usually zero-sized) selector type per binding, so the
/// projection can borrow from the state for exactly as long as the props
/// live.
///
/// ```ignore
/// struct ListSelector;
///
/// impl MapState<AppState, TodoListView> for ListSelector {
///     fn map<'s>(&self, state: &'s AppState) -> TodoListProps<'s> {
///         TodoListProps { todos: &state.todos, filter: &state.visibility_filter }
///     }
/// }
/// ```
pub trait MapState<S, C: Component> {
    fn map<'s>(&self, state: &'s S) -> C::Props<'s>;
}

/// A component bound to a store through a pair of projections
///
/// - `map_state` turns the store state into the component's props
/// - `map_intent` turns the component's intents into store actions;
///   returning `None` drops the intent
///
/// ```ignore
/// let mut list = Connect::new(
///     TodoListView::default(),
///     ListSelector,
///     |intent| match intent {
///         TodoListIntent::Toggle(id) => Some(TodoAction::ToggleTodo { id }),
///     },
/// );
///
/// list.render(frame, area, StoreContext::new(&store));
/// list.handle_event(&event, StoreContext::new(&store))?;
/// ```
pub struct Connect<C, S, A, P, D> {
    inner: C,
    map_state: P,
    map_intent: D,
    _marker: PhantomData<fn(&S) -> A>,
}

impl<C, S, A, P, D> Connect<C, S, A, P, D>
where
    C: Component,
    A: Action,
    P: MapState<S, C>,
    D: FnMut(C::Intent) -> Option<A>,
{
    pub fn new(inner: C, map_state: P, map_intent: D) -> Self {
        Self {
            inner,
            map_state,
            map_intent,
            _marker: PhantomData,
        }
    }

    /// The wrapped component
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The wrapped component, for adjusting its local UI state (focus, cursor)
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Render the inner component with props projected from the current state
    pub fn render<M: Middleware<A>>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        ctx: StoreContext<'_, S, A, M>,
    ) {
        let map_state = &self.map_state;
        let inner = &mut self.inner;
        ctx.with_state(|state| inner.render(frame, area, map_state.map(state)));
    }

    /// Route an event through the inner component and dispatch the
    /// resulting actions in order
    ///
    /// Intents are collected before anything is dispatched, so the
    /// component never observes a half-applied batch. Returns the number
    /// of actions dispatched.
    ///
    /// # Errors
    ///
    /// Stops at the first rejected dispatch and returns its error.
    pub fn handle_event<M: Middleware<A>>(
        &mut self,
        event: &EventKind,
        ctx: StoreContext<'_, S, A, M>,
    ) -> Result<usize, StoreError>
    where
        S: PartialEq,
    {
        let map_state = &self.map_state;
        let inner = &mut self.inner;
        let intents: Vec<C::Intent> = ctx.with_state(|state| {
            inner
                .handle_event(event, map_state.map(state))
                .into_iter()
                .collect()
        });

        let mut dispatched = 0;
        for intent in intents {
            if let Some(action) = (self.map_intent)(intent) {
                ctx.dispatch(action)?;
                dispatched += 1;
            }
        }
        Ok(dispatched)
    }
}

impl<C, S, A, P, D> fmt::Debug for Connect<C, S, A, P, D>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connect")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, into_event, RenderHarness};
    use ratatui::widgets::Paragraph;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct CounterState {
        count: i32,
        label: String,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Add(i32),
    }

    impl Action for CounterAction {
        fn name(&self) -> &'static str {
            "Add"
        }
    }

    fn reducer(state: &CounterState, action: &CounterAction) -> CounterState {
        match action {
            CounterAction::Add(n) => CounterState {
                count: state.count + n,
                label: state.label.clone(),
            },
        }
    }

    enum Intent {
        Bump,
        Ignored,
    }

    #[derive(Debug, Default)]
    struct CounterView {
        renders: usize,
    }

    struct CounterProps<'a> {
        count: i32,
        label: &'a str,
    }

    impl Component for CounterView {
        type Props<'a> = CounterProps<'a>;
        type Intent = Intent;

        fn handle_event(
            &mut self,
            event: &EventKind,
            _props: Self::Props<'_>,
        ) -> impl IntoIterator<Item = Intent> {
            match event.as_key().map(|k| k.code) {
                Some(crossterm::event::KeyCode::Char('+')) => vec![Intent::Bump, Intent::Bump],
                Some(_) => vec![Intent::Ignored],
                None => vec![],
            }
        }

        fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
            self.renders += 1;
            frame.render_widget(
                Paragraph::new(format!("{}: {}", props.label, props.count)),
                area,
            );
        }
    }

    struct Project;

    impl MapState<CounterState, CounterView> for Project {
        fn map<'s>(&self, state: &'s CounterState) -> CounterProps<'s> {
            CounterProps {
                count: state.count,
                label: &state.label,
            }
        }
    }

    fn map_intent(intent: Intent) -> Option<CounterAction> {
        match intent {
            Intent::Bump => Some(CounterAction::Add(1)),
            Intent::Ignored => None,
        }
    }

    fn store() -> Store<CounterState, CounterAction> {
        Store::new(
            CounterState {
                count: 0,
                label: "clicks".into(),
            },
            reducer,
        )
    }

    #[test]
    fn test_connect_renders_projected_props() {
        let store = store();
        let mut view = Connect::new(CounterView::default(), Project, map_intent);
        let mut render = RenderHarness::new(20, 1);

        let output = render.render_to_string_plain(|frame| {
            view.render(frame, frame.area(), StoreContext::new(&store));
        });

        assert_eq!(output.trim_end(), "clicks: 0");
        assert_eq!(view.inner().renders, 1);
    }

    #[test]
    fn test_connect_dispatches_mapped_intents() {
        let store = store();
        let mut view = Connect::new(CounterView::default(), Project, map_intent);

        let dispatched = view
            .handle_event(&into_event(char_key('+')), StoreContext::new(&store))
            .unwrap();
        assert_eq!(dispatched, 2);
        assert_eq!(store.get_state().count, 2);

        let dispatched = view
            .handle_event(&into_event(char_key('x')), (&store).into())
            .unwrap();
        assert_eq!(dispatched, 0);
        assert_eq!(store.get_state().count, 2);
    }

    #[test]
    fn test_connect_with_capturing_intent_mapper() {
        let store = store();
        let mut seen = 0;
        let mut view = Connect::new(CounterView::default(), Project, |intent| {
            seen += 1;
            map_intent(intent)
        });

        view.handle_event(&into_event(char_key('+')), StoreContext::new(&store))
            .unwrap();
        drop(view);
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_store_context_dispatch() {
        let store = store();
        let ctx = StoreContext::new(&store);
        let copy = ctx;
        assert!(copy.dispatch(CounterAction::Add(3)).unwrap());
        assert_eq!(ctx.with_state(|s| s.count), 3);
    }
}
