//! The state container.
//!
//! A [`Store`] owns one root reducer and the current snapshot. Every
//! [`Store::dispatch`] replaces the snapshot with the reducer's output and
//! then notifies listeners. There is no global store: callers construct one
//! and pass it where it is needed.

use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use folio_kernel::{RootReducer, RootState};
use folio_types::Event;

use crate::error::Result;

/// Callback invoked with the new snapshot after every dispatch.
pub type Listener = Box<dyn FnMut(&RootState) + Send>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Owns the current state and threads events through the root reducer.
pub struct Store<E> {
    root: RootReducer<E>,
    state: RootState,
    /// Number of dispatches applied.
    sequence: u64,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
    #[cfg(feature = "broadcast")]
    broadcast: crate::broadcast::StateBroadcast,
}

impl<E: Debug> Store<E> {
    /// Creates a store whose state is the reducer's initial state.
    pub fn new(root: RootReducer<E>) -> Self {
        let state = root.initial_state();
        Self::from_parts(root, state)
    }

    /// Creates a store by reducing the absent state with `init`.
    ///
    /// Every slice takes its absent path. Listeners do not exist yet and the
    /// sequence stays at zero.
    pub fn init(root: RootReducer<E>, init: &E) -> Self {
        let state = root.reduce(None, init);
        Self::from_parts(root, state)
    }

    /// Creates a store starting from a preloaded snapshot.
    ///
    /// The snapshot is conformed to the reducer's slices first: unknown keys
    /// are dropped, and missing or mistyped slices start from their initial
    /// value.
    pub fn with_state(root: RootReducer<E>, preloaded: RootState) -> Self {
        let state = root.normalize(preloaded);
        Self::from_parts(root, state)
    }

    fn from_parts(root: RootReducer<E>, state: RootState) -> Self {
        tracing::debug!(slices = root.slice_count(), "store created");
        Self {
            root,
            state,
            sequence: 0,
            listeners: BTreeMap::new(),
            next_subscription: 0,
            #[cfg(feature = "broadcast")]
            broadcast: crate::broadcast::StateBroadcast::default(),
        }
    }

    /// Applies one event and replaces the current snapshot.
    ///
    /// Returns true if any slice changed. Listeners are notified either way.
    pub fn dispatch(&mut self, event: &E) -> bool {
        let reduction = self.root.apply(Some(&self.state), event);
        self.state = reduction.state;
        self.sequence += 1;

        tracing::debug!(
            ?event,
            sequence = self.sequence,
            changed = reduction.changed,
            "event dispatched"
        );

        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
        if !self.listeners.is_empty() {
            tracing::trace!(listeners = self.listeners.len(), "listeners notified");
        }

        #[cfg(feature = "broadcast")]
        self.broadcast.send(crate::broadcast::StateChanged {
            sequence: self.sequence,
            changed: reduction.changed,
        });

        reduction.changed
    }

    /// Dispatches every event in order.
    ///
    /// Returns the number of dispatches that changed the state.
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a E>) -> usize
    where
        E: 'a,
    {
        events
            .into_iter()
            .filter(|event| self.dispatch(event))
            .count()
    }

    /// Returns the current snapshot.
    pub fn state(&self) -> &RootState {
        &self.state
    }

    /// Returns the number of dispatches applied so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Registers a listener called after every dispatch.
    pub fn subscribe(&mut self, listener: impl FnMut(&RootState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns a receiver of [`crate::StateChanged`] notifications.
    #[cfg(feature = "broadcast")]
    pub fn broadcast(&self) -> tokio::sync::broadcast::Receiver<crate::broadcast::StateChanged> {
        self.broadcast.subscribe()
    }

    /// Consumes the store, returning the current snapshot.
    pub fn into_state(self) -> RootState {
        self.state
    }
}

impl Store<Event> {
    /// Decodes one JSON event envelope and dispatches it.
    pub fn dispatch_json(&mut self, text: &str) -> Result<bool> {
        let event = Event::from_json(text)?;
        Ok(self.dispatch(&event))
    }
}

impl<E> Debug for Store<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("sequence", &self.sequence)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
