//! Replaying recorded actions from JSON lines

use std::io::{self, BufRead};

use thiserror::Error;
use todo_dispatch::{decode_action_str, Action, InvalidActionError, Middleware, Store, StoreError};

use crate::action::TodoAction;
use crate::state::AppState;

/// Why a replay stopped
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read actions: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    InvalidAction {
        line: usize,
        #[source]
        source: InvalidActionError,
    },

    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: StoreError,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Dispatch one action per non-blank line of `reader`, in order
///
/// Stops at the first line that is not a valid action. Returns the number
/// of actions dispatched.
pub fn replay_actions<R, M>(
    reader: R,
    store: &Store<AppState, TodoAction, M>,
) -> Result<usize, ReplayError>
where
    R: BufRead,
    M: Middleware<TodoAction>,
{
    let mut dispatched = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let action: TodoAction = decode_action_str(&line).map_err(|source| {
            ReplayError::InvalidAction {
                line: number,
                source,
            }
        })?;
        tracing::debug!(line = number, action = %action.name(), "replaying");
        if let TodoAction::AddTodo { id, .. } = &action {
            if store.with_state(|state| state.todos.get(*id).is_some()) {
                tracing::warn!(line = number, %id, "ADD_TODO reuses an existing id");
            }
        }

        store.dispatch(action).map_err(|source| ReplayError::Rejected {
            line: number,
            source,
        })?;
        dispatched += 1;
    }

    tracing::info!(dispatched, "replay finished");
    Ok(dispatched)
}

/// Encode `state` as JSON, pretty-printed unless `compact`
pub fn encode_state(state: &AppState, compact: bool) -> Result<String, ReplayError> {
    let json = if compact {
        serde_json::to_string(state)?
    } else {
        serde_json::to_string_pretty(state)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use todo_dispatch::CombinedReducer;

    #[test]
    fn test_error_messages_carry_line_numbers() {
        let store = Store::bootstrap(AppState::reducer());
        let input = "{\"type\":\"ADD_TODO\",\"id\":0,\"text\":\"a\"}\n\n[1]\n";

        let err = replay_actions(input.as_bytes(), &store).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidAction { line: 3, .. }));
        assert_eq!(err.to_string(), "line 3: action must be a JSON object, got an array");
        assert_eq!(store.get_state().todos.len(), 1);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_duplicate_id_is_warned_and_still_appended() {
        let store = Store::bootstrap(AppState::reducer());
        let input = "{\"type\":\"ADD_TODO\",\"id\":4,\"text\":\"a\"}\n\
                     {\"type\":\"ADD_TODO\",\"id\":5,\"text\":\"b\"}\n\
                     {\"type\":\"ADD_TODO\",\"id\":4,\"text\":\"c\"}\n";

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let count = tracing::subscriber::with_default(subscriber, || {
            replay_actions(input.as_bytes(), &store)
        })
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(store.get_state().todos.len(), 3);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("reuses an existing id"));
        assert!(warnings[0].contains("line=3"));
    }
}
