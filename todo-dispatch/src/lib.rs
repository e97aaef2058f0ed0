//! todo-dispatch: Reducer-driven state management for Rust TUI apps
//!
//! Like Redux, but for terminals. State changes only through dispatched
//! actions, reducers are pure functions, and views subscribe to the store
//! and re-read state when notified.
//!
//! # Example
//! ```ignore
//! use todo_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! fn reduce_count(state: &u32, action: &CounterAction) -> u32 {
//!     match action {
//!         CounterAction::Increment => state + 1,
//!         CounterAction::Reset => 0,
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default, PartialEq, CombinedReducer)]
//! #[reducer(action = "CounterAction")]
//! struct AppState {
//!     #[reducer(with = "reduce_count")]
//!     count: u32,
//! }
//!
//! let store = Store::bootstrap(AppState::reducer());
//! store.dispatch(CounterAction::Increment)?;
//! ```

// Re-export everything from core
pub use todo_dispatch_core::*;

// Re-export derive macros
pub use todo_dispatch_macros::{Action, CombinedReducer};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use todo_dispatch_core::{Action, ActionSummary, CombinedReducer, Component};

    // Event system
    pub use todo_dispatch_core::{
        process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent,
    };

    // Store
    pub use todo_dispatch_core::{
        ComposedMiddleware, Connect, InvalidActionError, LoggingMiddleware, MapState, Middleware,
        NoopMiddleware, Reducer, Store, StoreContext, StoreError, Subscription, WeakStore,
    };

    // Debug
    pub use todo_dispatch_core::debug::{ActionLog, ActionLoggerConfig, ActionLoggerMiddleware};

    // Derive macros
    pub use todo_dispatch_macros::{Action, CombinedReducer};

    // Ratatui re-exports
    pub use todo_dispatch_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
