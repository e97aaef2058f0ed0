//! Property tests for the todo reducers

use std::sync::Arc;

use proptest::prelude::*;
use todo_dispatch::CombinedReducer;
use todos::{
    reduce_todo, reduce_todos, reduce_visibility_filter, AppState, TodoAction, TodoId, TodoList,
    VisibilityFilter,
};

fn filter_strategy() -> impl Strategy<Value = VisibilityFilter> {
    prop_oneof![
        Just(VisibilityFilter::ShowAll),
        Just(VisibilityFilter::ShowActive),
        Just(VisibilityFilter::ShowCompleted),
        "[A-Z_]{1,12}".prop_map(VisibilityFilter::from),
    ]
}

fn action_strategy() -> impl Strategy<Value = TodoAction> {
    prop_oneof![
        (0u64..16, "[a-z ]{0,12}").prop_map(|(id, text)| TodoAction::AddTodo {
            id: TodoId(id),
            text,
        }),
        (0u64..16).prop_map(|id| TodoAction::ToggleTodo { id: TodoId(id) }),
        filter_strategy().prop_map(|filter| TodoAction::SetVisibilityFilter { filter }),
        Just(TodoAction::Unrecognized),
    ]
}

/// A list built the way the app builds it: unique ids, in creation order
fn list_strategy() -> impl Strategy<Value = TodoList> {
    prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..12).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(index, (text, completed))| todos::Todo {
                id: TodoId(index as u64),
                text,
                completed,
            })
            .collect()
    })
}

fn state_strategy() -> impl Strategy<Value = AppState> {
    (list_strategy(), filter_strategy()).prop_map(|(todos, visibility_filter)| AppState {
        todos,
        visibility_filter,
    })
}

proptest! {
    #[test]
    fn unrecognized_actions_are_pointer_stable(state in state_strategy()) {
        let next = AppState::reduce(&state, &TodoAction::Unrecognized);
        prop_assert!(next.todos.ptr_eq(&state.todos));
        prop_assert_eq!(
            reduce_visibility_filter(&state.visibility_filter, &TodoAction::Unrecognized),
            state.visibility_filter.clone()
        );
        prop_assert_eq!(next, state);
    }

    #[test]
    fn toggle_twice_restores_list(list in list_strategy(), id in 0u64..16) {
        let action = TodoAction::ToggleTodo { id: TodoId(id) };
        let twice = reduce_todos(&reduce_todos(&list, &action), &action);
        prop_assert_eq!(twice, list);
    }

    #[test]
    fn toggle_twice_restores_single_todo(text in "[a-z]{0,8}", completed in any::<bool>()) {
        let todo = Arc::new(todos::Todo { id: TodoId(3), text, completed });
        let action = TodoAction::ToggleTodo { id: TodoId(3) };
        let once = reduce_todo(Some(&todo), &action);
        let twice = reduce_todo(once.as_ref(), &action).unwrap();
        prop_assert_eq!(&*twice, &*todo);
    }

    #[test]
    fn add_grows_by_one_with_an_open_todo(list in list_strategy(), text in "[a-z ]{0,12}") {
        let id = TodoId(list.len() as u64);
        let next = reduce_todos(&list, &TodoAction::AddTodo { id, text: text.clone() });

        prop_assert_eq!(next.len(), list.len() + 1);
        let added = &next.as_slice()[list.len()];
        prop_assert_eq!(added.id, id);
        prop_assert_eq!(&added.text, &text);
        prop_assert!(!added.completed);
        for (old, new) in list.iter().zip(next.iter()) {
            prop_assert!(Arc::ptr_eq(old, new));
        }
    }

    #[test]
    fn toggle_of_absent_id_changes_nothing(list in list_strategy()) {
        let absent = TodoId(list.len() as u64 + 100);
        let next = reduce_todos(&list, &TodoAction::ToggleTodo { id: absent });
        prop_assert_eq!(&next, &list);
        for (old, new) in list.iter().zip(next.iter()) {
            prop_assert!(Arc::ptr_eq(old, new));
        }
    }

    #[test]
    fn length_never_shrinks(state in state_strategy(), actions in prop::collection::vec(action_strategy(), 0..24)) {
        let mut current = state;
        for action in &actions {
            let next = AppState::reduce(&current, action);
            let grew = matches!(action, TodoAction::AddTodo { .. });
            prop_assert_eq!(next.todos.len(), current.todos.len() + usize::from(grew));
            current = next;
        }
    }

    #[test]
    fn filter_field_only_moves_on_set_filter(state in state_strategy(), action in action_strategy()) {
        let next = AppState::reduce(&state, &action);
        match &action {
            TodoAction::SetVisibilityFilter { filter } => prop_assert_eq!(&next.visibility_filter, filter),
            _ => prop_assert_eq!(&next.visibility_filter, &state.visibility_filter),
        }
        if !matches!(action, TodoAction::AddTodo { .. } | TodoAction::ToggleTodo { .. }) {
            prop_assert!(next.todos.ptr_eq(&state.todos));
        }
    }
}
