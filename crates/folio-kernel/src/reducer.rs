//! Slice reducers.
//!
//! A slice reducer owns exactly one named region of the root state. It is a
//! pure function from the previous slice state and an event to the next slice
//! state, and it supplies the default used when there is no previous state.

use std::fmt::{self, Debug};

use crate::state::SliceData;

/// A pure reducer over one slice of state.
///
/// Implementations must be total: any event the reducer does not recognize
/// yields `state.clone()`.
pub trait Reducer<E>: Send + Sync {
    /// The slice state this reducer owns.
    type State: SliceData + Clone + PartialEq;

    /// The state used when the slice has no prior value.
    fn initial_state(&self) -> Self::State;

    /// Applies one event to the slice state.
    fn reduce(&self, state: &Self::State, event: &E) -> Self::State;

    /// Applies one event to a possibly absent slice state.
    ///
    /// An absent state takes the [`Reducer::initial_state`] path first.
    fn reduce_slice(&self, state: Option<&Self::State>, event: &E) -> Self::State {
        match state {
            Some(state) => self.reduce(state, event),
            None => self.reduce(&self.initial_state(), event),
        }
    }
}

/// A reducer backed by a closure and an initial value.
///
/// Created with [`reducer_fn`].
pub struct FnReducer<S, F> {
    initial: S,
    reduce: F,
}

/// Builds a slice reducer from an initial value and a closure.
///
/// ```ignore
/// let added = reducer_fn(0_u64, |count: &u64, event: &Event| match event {
///     Event::AddBook(_) => count + 1,
///     _ => *count,
/// });
/// ```
pub fn reducer_fn<S, F>(initial: S, reduce: F) -> FnReducer<S, F> {
    FnReducer { initial, reduce }
}

impl<E, S, F> Reducer<E> for FnReducer<S, F>
where
    S: SliceData + Clone + PartialEq,
    F: Fn(&S, &E) -> S + Send + Sync,
{
    type State = S;

    fn initial_state(&self) -> S {
        self.initial.clone()
    }

    fn reduce(&self, state: &S, event: &E) -> S {
        (self.reduce)(state, event)
    }
}

impl<S: Debug, F> Debug for FnReducer<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnReducer")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}
