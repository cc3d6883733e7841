//! Replaying an event history through a root reducer.
//!
//! Because reducers are pure, the snapshot after a history depends on the
//! history alone. Replaying the same events always yields an equal state.

use crate::kernel::RootReducer;
use crate::state::RootState;

/// Folds `events` through `root`, starting from the absent state.
///
/// An empty history yields the initial state.
pub fn replay<'a, E: 'a>(
    root: &RootReducer<E>,
    events: impl IntoIterator<Item = &'a E>,
) -> RootState {
    events
        .into_iter()
        .fold(None, |state: Option<RootState>, event| {
            Some(root.reduce(state.as_ref(), event))
        })
        .unwrap_or_else(|| root.initial_state())
}

/// Like [`replay`], but returns the snapshot after every event.
pub fn replay_states<'a, E: 'a>(
    root: &RootReducer<E>,
    events: impl IntoIterator<Item = &'a E>,
) -> Vec<RootState> {
    let mut states: Vec<RootState> = Vec::new();
    for event in events {
        let next = root.reduce(states.last(), event);
        states.push(next);
    }
    states
}
