//! Centralized state store with reducer pattern and change subscriptions

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::wire;
use crate::Action;

type Listener = Rc<dyn Fn()>;

/// Identifier of a registered listener, unique for the lifetime of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Listeners in registration order, frozen for one notification pass
    fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Call [`unsubscribe`](Self::unsubscribe) to deregister the listener.
/// Dropping the handle leaves the listener registered.
pub struct Subscription {
    id: ListenerId,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Id of the listener this handle controls
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live store
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.borrow().contains(self.id))
    }

    /// Deregister exactly this listener
    ///
    /// Safe to call from inside any listener, including the one being
    /// removed. Returns `false` if the listener was already gone or the
    /// store has been dropped.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let removed = listeners.borrow_mut().remove(self.id);
        if removed {
            tracing::trace!(listener = self.id.0, "listener unsubscribed");
        }
        removed
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Clears the in-progress marker even if a reducer or listener panics
struct DispatchGuard<'a> {
    dispatching: &'a Cell<Option<&'static str>>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(dispatching: &'a Cell<Option<&'static str>>, action: &'static str) -> Self {
        dispatching.set(Some(action));
        Self { dispatching }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.dispatching.set(None);
    }
}

struct Inner<S, A: Action, M> {
    state: RefCell<S>,
    reducer: Reducer<S, A>,
    middleware: RefCell<M>,
    listeners: Rc<RefCell<Listeners>>,
    dispatching: Cell<Option<&'static str>>,
}

/// Centralized state store with Redux-like reducer pattern
///
/// The store owns the single current state value and is the only place it
/// changes. `dispatch` runs the reducer, replaces the state with the result,
/// then synchronously notifies every subscribed listener. Listeners take no
/// arguments and read the new state back through a [`WeakStore`]; a strong
/// clone captured by a listener keeps the store alive forever.
///
/// `Store` is a cheap handle: clones share the same state, so pass clones to
/// the views and listeners that need them. It is single-threaded (`!Send`);
/// wrap it in an external lock to share it across threads.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `M` - Middleware wrapped around each dispatch
///
/// # Example
/// ```ignore
/// #[derive(Clone, Default, PartialEq)]
/// struct AppState {
///     counter: i32,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum MyAction {
///     Increment,
///     Decrement,
/// }
///
/// fn reducer(state: &AppState, action: &MyAction) -> AppState {
///     match action {
///         MyAction::Increment => AppState { counter: state.counter + 1 },
///         MyAction::Decrement => AppState { counter: state.counter - 1 },
///     }
/// }
///
/// let store = Store::new(AppState::default(), reducer);
/// let reader = store.downgrade();
/// store.subscribe(move || {
///     if let Some(store) = reader.upgrade() {
///         println!("counter = {}", store.get_state().counter);
///     }
/// });
/// store.dispatch(MyAction::Increment)?;
/// assert_eq!(store.get_state().counter, 1);
/// ```
pub struct Store<S, A: Action, M: Middleware<A> = NoopMiddleware> {
    inner: Rc<Inner<S, A, M>>,
}

impl<S, A: Action, M: Middleware<A>> Clone for Store<S, A, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Non-owning store handle, see [`Store::downgrade`]
pub struct WeakStore<S, A: Action, M: Middleware<A> = NoopMiddleware> {
    inner: Weak<Inner<S, A, M>>,
}

impl<S, A: Action, M: Middleware<A>> Clone for WeakStore<S, A, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A: Action, M: Middleware<A>> WeakStore<S, A, M> {
    /// The store, unless every strong handle has been dropped
    pub fn upgrade(&self) -> Option<Store<S, A, M>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<S, A: Action, M: Middleware<A>> fmt::Debug for WeakStore<S, A, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStore")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }

    /// Create a store whose state starts from every slice's default value
    pub fn bootstrap(reducer: Reducer<S, A>) -> Self
    where
        S: Default,
    {
        let store = Self::new(S::default(), reducer);
        tracing::trace!("store bootstrapped with default state");
        store
    }
}

impl<S, A: Action, M: Middleware<A>> Store<S, A, M> {
    /// Create a new store with middleware wrapped around each dispatch
    pub fn with_middleware(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                reducer,
                middleware: RefCell::new(middleware),
                listeners: Rc::new(RefCell::new(Listeners::default())),
                dispatching: Cell::new(None),
            }),
        }
    }

    /// Handle for listeners that need to read the store back
    pub fn downgrade(&self) -> WeakStore<S, A, M> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Snapshot of the current state
    pub fn get_state(&self) -> S
    where
        S: Clone,
    {
        self.inner.state.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Read the middleware, e.g. to display an action log
    pub fn inspect_middleware<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.inner.middleware.borrow())
    }

    /// Register a listener called after every successful dispatch
    ///
    /// Listeners run in registration order. A listener registered while a
    /// notification pass is running is first called on the next dispatch.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.listeners.borrow_mut().insert(Rc::new(listener));
        tracing::trace!(listener = id.0, "listener subscribed");
        Subscription {
            id,
            listeners: Rc::downgrade(&self.inner.listeners),
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().entries.len()
    }

    /// Whether a dispatch is currently in progress
    pub fn is_dispatching(&self) -> bool {
        self.inner.dispatching.get().is_some()
    }

    /// Dispatch an action to the store
    ///
    /// Runs middleware `before`, the reducer, middleware `after`, then every
    /// listener registered when the notification pass starts. Listeners are
    /// notified whether or not the state changed.
    ///
    /// Returns `Ok(true)` if the new state differs from the old one by value.
    ///
    /// # Errors
    ///
    /// [`StoreError::ReentrantDispatch`] if called while another dispatch is
    /// still in progress (for example from inside a listener). The state is
    /// left untouched and nothing is notified.
    pub fn dispatch(&self, action: A) -> Result<bool, StoreError>
    where
        S: PartialEq,
    {
        let inner = &*self.inner;
        if let Some(in_progress) = inner.dispatching.get() {
            tracing::warn!(
                action = %action.name(),
                in_progress = %in_progress,
                "Rejected reentrant dispatch"
            );
            return Err(StoreError::ReentrantDispatch {
                action: action.name(),
                in_progress,
            });
        }
        // A caller still inside `with_state` or `inspect_middleware` holds a
        // borrow; reject instead of panicking on the RefCell
        let busy = |in_progress: &'static str| {
            tracing::warn!(action = %action.name(), in_progress, "Rejected dispatch during read");
            StoreError::ReentrantDispatch {
                action: action.name(),
                in_progress,
            }
        };
        let mut state = inner.state.try_borrow_mut().map_err(|_| busy("with_state"))?;
        let mut middleware = inner
            .middleware
            .try_borrow_mut()
            .map_err(|_| busy("inspect_middleware"))?;
        let _guard = DispatchGuard::enter(&inner.dispatching, action.name());

        middleware.before(&action);
        let next = (inner.reducer)(&*state, &action);
        let changed = *state != next;
        *state = next;
        middleware.after(&action, changed);
        drop(middleware);
        drop(state);

        let listeners = inner.listeners.borrow().snapshot();
        for listener in listeners {
            (*listener)();
        }

        Ok(changed)
    }

    /// Decode an action from its JSON wire form and dispatch it
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidAction`] if the value is not a well-formed action,
    /// or any error [`dispatch`](Self::dispatch) returns. Either way the state
    /// is untouched.
    pub fn dispatch_json(&self, value: serde_json::Value) -> Result<bool, StoreError>
    where
        S: PartialEq,
        A: DeserializeOwned,
    {
        let action: A = wire::decode_action(value)?;
        self.dispatch(action)
    }
}

impl<S, A: Action, M: Middleware<A>> fmt::Debug for Store<S, A, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("listeners", &self.listener_count())
            .field("dispatching", &self.inner.dispatching.get())
            .finish_non_exhaustive()
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns to
/// your store. Middleware observes actions; it cannot replace them.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran and the state was replaced
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions (for debugging)
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

/// Compose multiple middleware into a single middleware
pub struct ComposedMiddleware<A: Action> {
    middlewares: Vec<Box<dyn Middleware<A>>>,
}

impl<A: Action> fmt::Debug for ComposedMiddleware<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<A: Action> Default for ComposedMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> ComposedMiddleware<A> {
    /// Create a new composed middleware
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<A> + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Builder-style [`add`](Self::add)
    pub fn with<M: Middleware<A> + 'static>(mut self, middleware: M) -> Self {
        self.add(middleware);
        self
    }
}

impl<A: Action> Middleware<A> for ComposedMiddleware<A> {
    fn before(&mut self, action: &A) {
        for middleware in &mut self.middlewares {
            middleware.before(action);
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        // Call in reverse order for proper nesting
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.after(action, state_changed);
        }
    }
}
