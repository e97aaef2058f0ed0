//! Debug and inspection utilities
//!
//! - **Action Logging**: pattern-filtered tracing plus an in-memory ring buffer
//! - **Widgets**: render the action log next to the application UI
//!
//! ```ignore
//! use todo_dispatch::debug::{ActionLoggerMiddleware, ActionLogWidget};
//!
//! let store = Store::with_middleware(state, reducer, ActionLoggerMiddleware::with_default_log());
//!
//! // In render:
//! store.inspect_middleware(|m| {
//!     if let Some(log) = m.log() {
//!         frame.render_widget(ActionLogWidget::new(log), log_area);
//!     }
//! });
//! ```

pub mod action_logger;
pub mod widgets;

pub use action_logger::{
    glob_match, ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig,
    ActionLoggerMiddleware,
};
pub use widgets::{ActionLogStyle, ActionLogWidget};
