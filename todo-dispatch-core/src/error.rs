//! Errors raised by the store and the action wire decoder

use thiserror::Error;

/// An action that could not be decoded from its wire representation
///
/// Produced only at the JSON boundary. Typed actions built in Rust can never
/// be malformed, and unknown `type` values are not errors.
#[derive(Debug, Error)]
pub enum InvalidActionError {
    /// The input was not valid JSON
    #[error("action is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The action was valid JSON but not an object
    #[error("action must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// The object has no string `type` discriminant
    #[error("action is missing a string `type` field")]
    MissingType,

    /// A recognised `type` carried a payload of the wrong shape
    #[error("malformed `{action_type}` action: {source}")]
    Malformed {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a dispatch is rejected before the state is touched
#[derive(Debug, Error)]
pub enum StoreError {
    /// `dispatch` was called while another dispatch was still running its
    /// reducer, middleware or listeners
    #[error("cannot dispatch `{action}` while `{in_progress}` is still being processed")]
    ReentrantDispatch {
        action: &'static str,
        in_progress: &'static str,
    },

    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),
}

impl StoreError {
    /// Whether this error is a rejected reentrant dispatch
    pub fn is_reentrant(&self) -> bool {
        matches!(self, StoreError::ReentrantDispatch { .. })
    }
}
