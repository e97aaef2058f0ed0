//! Reducers and reducer composition
//!
//! A reducer is a pure function `(&state, &action) -> state`. It never mutates
//! its input; the store replaces its state wholesale with the returned value.
//! Reducers that ignore an action return a clone of their input, which for
//! `Arc`-backed slices keeps the old allocation alive (pointer-equal).

/// A pure reducer over state `S` for actions `A`
pub type Reducer<S, A> = fn(&S, &A) -> S;

/// A state type assembled from independently reduced fields
///
/// Every field owns its own slice reducer. On each action, every field
/// reducer runs with that field's current slice and the action, and the
/// results are collected into a new value. Field reducers never observe
/// their siblings, so evaluation order carries no meaning.
///
/// Usually derived:
///
/// ```ignore
/// use todo_dispatch::CombinedReducer;
///
/// #[derive(Clone, Debug, Default, PartialEq, CombinedReducer)]
/// #[reducer(action = "AppAction")]
/// struct AppState {
///     #[reducer(with = "reduce_count")]
///     count: i64,
///     #[reducer(with = "reduce_label")]
///     label: String,
/// }
///
/// let next = AppState::reduce(&AppState::default(), &AppAction::Increment);
/// ```
pub trait CombinedReducer<A>: Sized {
    /// Compute the next combined state
    fn reduce(state: &Self, action: &A) -> Self;

    /// The combined reducer as a plain function pointer, for [`Store`](crate::Store)
    fn reducer() -> Reducer<Self, A> {
        Self::reduce
    }
}
