//! Tests for #[derive(Action)] macro

use serde::Deserialize;
use todo_dispatch::{Action, ActionSummary};

#[derive(Action, Clone, Debug, PartialEq, Deserialize)]
#[action(summary)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum ListAction {
    Append { item: String },
    Remove(usize),
    Clear,
    #[action(name = "Unknown")]
    #[serde(other)]
    Unrecognized,
}

#[test]
fn test_name_for_each_variant_style() {
    assert_eq!(
        ListAction::Append {
            item: "a".to_string()
        }
        .name(),
        "Append"
    );
    assert_eq!(ListAction::Remove(3).name(), "Remove");
    assert_eq!(ListAction::Clear.name(), "Clear");
}

#[test]
fn test_name_override() {
    assert_eq!(ListAction::Unrecognized.name(), "Unknown");
}

#[test]
fn test_summary_uses_debug() {
    assert_eq!(ListAction::Remove(3).summary(), "Remove(3)");
}

#[test]
fn test_derived_action_decodes_from_wire() {
    let action: ListAction =
        todo_dispatch::decode_action_str(r#"{"type":"APPEND","item":"milk"}"#).unwrap();
    assert_eq!(action.name(), "Append");

    let action: ListAction = todo_dispatch::decode_action_str(r#"{"type":"@@INIT"}"#).unwrap();
    assert_eq!(action, ListAction::Unrecognized);
}

#[test]
fn test_generic_action() {
    #[derive(Action, Clone, Debug)]
    enum Wrapped<T: Clone + std::fmt::Debug + Send + 'static> {
        Value(T),
        Empty,
    }

    assert_eq!(Wrapped::Value(1u8).name(), "Value");
    assert_eq!(Wrapped::<u8>::Empty.name(), "Empty");
}
