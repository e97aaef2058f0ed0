//! Replaying JSON-lines action logs into a fresh store

use serde_json::{json, Value};
use todo_dispatch::debug::ActionLoggerConfig;
use todos::{encode_state, new_store, replay_actions, AppState, ReplayError};

const SESSION: &str = r#"{"type": "@@INIT"}
{"type": "ADD_TODO", "id": 0, "text": "buy milk"}

{"type": "ADD_TODO", "id": 1, "text": "walk dog"}
{"type": "TOGGLE_TODO", "id": 0}
{"type": "SET_VISIBILITY_FILTER", "filter": "SHOW_ACTIVE"}
"#;

fn final_state(input: &str) -> Result<(usize, Value), ReplayError> {
    let store = new_store(AppState::default(), ActionLoggerConfig::default());
    let count = replay_actions(input.as_bytes(), &store)?;
    let encoded = store.with_state(|state| encode_state(state, true))?;
    Ok((count, serde_json::from_str(&encoded)?))
}

#[test]
fn session_replays_to_expected_state() {
    let (count, state) = final_state(SESSION).unwrap();

    assert_eq!(count, 5);
    assert_eq!(
        state,
        json!({
            "todos": [
                { "id": 0, "text": "buy milk", "completed": true },
                { "id": 1, "text": "walk dog", "completed": false },
            ],
            "visibilityFilter": "SHOW_ACTIVE",
        })
    );
}

#[test]
fn empty_input_leaves_the_default_state() {
    let (count, state) = final_state("\n\n").unwrap();
    assert_eq!(count, 0);
    assert_eq!(state, json!({ "todos": [], "visibilityFilter": "SHOW_ALL" }));
}

#[test]
fn bad_line_stops_replay_with_its_line_number() {
    let store = new_store(AppState::default(), ActionLoggerConfig::default());
    let input = "{\"type\": \"ADD_TODO\", \"id\": 0, \"text\": \"a\"}\n\nnot json\n{\"type\": \"TOGGLE_TODO\", \"id\": 0}\n";

    let err = replay_actions(input.as_bytes(), &store).unwrap_err();
    assert!(matches!(err, ReplayError::InvalidAction { line: 3, .. }));

    let state = store.get_state();
    assert_eq!(state.todos.len(), 1);
    assert!(!state.todos.as_slice()[0].completed);
}

#[test]
fn replayed_actions_reach_the_action_log() {
    let store = new_store(AppState::default(), ActionLoggerConfig::new(Some("*Todo"), None));
    replay_actions(SESSION.as_bytes(), &store).unwrap();

    let logged = store.inspect_middleware(|middleware| {
        middleware
            .log()
            .map(|log| log.entries().map(|entry| entry.name).collect::<Vec<_>>())
    });
    assert_eq!(
        logged,
        Some(vec!["AddTodo", "AddTodo", "ToggleTodo"])
    );
}

#[test]
fn pretty_and_compact_encodings_agree() {
    let store = new_store(AppState::default(), ActionLoggerConfig::default());
    replay_actions(SESSION.as_bytes(), &store).unwrap();

    let state = store.get_state();
    let pretty = encode_state(&state, false).unwrap();
    let compact = encode_state(&state, true).unwrap();

    assert!(pretty.contains('\n'));
    assert!(!compact.contains('\n'));
    assert_eq!(
        serde_json::from_str::<Value>(&pretty).unwrap(),
        serde_json::from_str::<Value>(&compact).unwrap()
    );
}
