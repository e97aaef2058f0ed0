//! JSON wire form of actions
//!
//! Actions cross process or file boundaries as JSON objects discriminated by
//! a string `type` field (`{"type": "ADD_TODO", "id": 0, "text": "..."}`).
//! Action enums opt in with serde's internally tagged representation:
//!
//! ```ignore
//! #[derive(Action, Clone, Debug, Serialize, Deserialize)]
//! #[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
//! enum AppAction {
//!     AddTodo { id: u64, text: String },
//!     #[serde(other)]
//!     Unrecognized,
//! }
//! ```
//!
//! A `#[serde(other)]` unit variant absorbs unknown `type` values, which are
//! no-ops rather than errors. Only structurally broken input is rejected.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InvalidActionError;

/// Name of the discriminant field of every wire action
pub const ACTION_TYPE_KEY: &str = "type";

/// Decode an action from an already parsed JSON value
///
/// # Errors
///
/// - [`InvalidActionError::NotAnObject`] if `value` is not an object
/// - [`InvalidActionError::MissingType`] if it has no string `type` field
/// - [`InvalidActionError::Malformed`] if the payload does not fit the type
pub fn decode_action<A: DeserializeOwned>(value: Value) -> Result<A, InvalidActionError> {
    let action_type = match &value {
        Value::Object(fields) => match fields.get(ACTION_TYPE_KEY) {
            Some(Value::String(action_type)) => action_type.clone(),
            _ => return Err(InvalidActionError::MissingType),
        },
        other => {
            return Err(InvalidActionError::NotAnObject {
                found: json_kind(other),
            })
        }
    };

    serde_json::from_value(value).map_err(|source| InvalidActionError::Malformed {
        action_type,
        source,
    })
}

/// Decode an action from JSON text
///
/// # Errors
///
/// [`InvalidActionError::Syntax`] for unparsable text, otherwise as
/// [`decode_action`].
pub fn decode_action_str<A: DeserializeOwned>(text: &str) -> Result<A, InvalidActionError> {
    let value: Value = serde_json::from_str(text).map_err(InvalidActionError::Syntax)?;
    decode_action(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
