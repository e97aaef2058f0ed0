//! Core traits and types for todo-dispatch
//!
//! This crate provides a small Redux-style state container for terminal
//! applications: actions describe changes, pure reducers compute the next
//! state, and a store holds the current state and notifies subscribers.
//!
//! # Core Concepts
//!
//! - **Action**: Immutable description of a requested change
//! - **Reducer**: Pure `(&state, &action) -> state` function
//! - **CombinedReducer**: A state struct whose fields reduce independently
//! - **Store**: State container with dispatch, subscribe and a reentrancy guard
//! - **Component**: UI element that renders props and emits intents
//! - **Connect / StoreContext**: Ways of wiring components to a store
//!
//! # Basic Example
//!
//! ```ignore
//! use todo_dispatch_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! fn reducer(state: &i32, action: &CounterAction) -> i32 {
//!     match action {
//!         CounterAction::Increment => state + 1,
//!         CounterAction::Decrement => state - 1,
//!     }
//! }
//!
//! let store = Store::new(0, reducer);
//! let subscription = store.subscribe(|| println!("changed"));
//! store.dispatch(CounterAction::Increment)?;
//! assert_eq!(store.get_state(), 1);
//! subscription.unsubscribe();
//! ```
//!
//! # Dispatch Cycle
//!
//! 1. The reentrancy guard is checked; dispatching from inside a reducer,
//!    middleware hook, listener, `with_state` or `inspect_middleware` call
//!    fails with [`StoreError::ReentrantDispatch`]
//! 2. Middleware `before` hooks run
//! 3. The reducer computes the next state, which replaces the current one
//! 4. Middleware `after` hooks run
//! 5. Listeners registered at that moment are called in registration order
//!
//! The guard is held until the last listener returns, so a listener that
//! needs a follow-up action should queue it and dispatch after `dispatch`
//! returns. Listeners that read the store back hold a [`WeakStore`] from
//! [`Store::downgrade`], so the listener list never keeps the store alive.
//!
//! The store is single-threaded. Events arrive from a background tokio task
//! ([`spawn_event_poller`]) and are forwarded over a channel to the thread
//! that owns the store.

pub mod action;
pub mod component;
pub mod connect;
pub mod debug;
pub mod error;
pub mod event;
pub mod reducer;
pub mod store;
pub mod testing;
pub mod wire;

// Core trait exports
pub use action::{Action, ActionSummary};
pub use component::Component;
pub use connect::{Connect, MapState, StoreContext};

// Error exports
pub use error::{InvalidActionError, StoreError};

// Event system exports
pub use event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};

// Store exports
pub use reducer::{CombinedReducer, Reducer};
pub use store::{
    ComposedMiddleware, ListenerId, LoggingMiddleware, Middleware, NoopMiddleware, Store,
    Subscription, WeakStore,
};

// Wire format exports
pub use wire::{decode_action, decode_action_str, ACTION_TYPE_KEY};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, ctrl_key, into_event, key, key_event, type_text,
    ListenerProbe, RenderHarness, StateHistory,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::component::Component;
    pub use crate::connect::{Connect, MapState, StoreContext};
    pub use crate::error::{InvalidActionError, StoreError};
    pub use crate::event::{
        process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent,
    };
    pub use crate::reducer::{CombinedReducer, Reducer};
    pub use crate::store::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Store, Subscription,
        WeakStore,
    };

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
