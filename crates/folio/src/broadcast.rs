//! State-change broadcasting for consumers outside the dispatch loop.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Emitted by the store after every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChanged {
    /// Number of dispatches applied so far, this one included.
    pub sequence: u64,
    /// False when every slice kept its previous value.
    pub changed: bool,
}

/// Broadcasts [`StateChanged`] notifications to any number of receivers.
#[derive(Debug, Clone)]
pub struct StateBroadcast {
    tx: broadcast::Sender<StateChanged>,
}

impl StateBroadcast {
    /// Creates a broadcaster with the given buffer size.
    ///
    /// Receivers that fall more than `buffer_size` notifications behind get
    /// `RecvError::Lagged`.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _rx) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Sends a notification to all receivers.
    ///
    /// Returns the number of receivers that got it.
    pub fn send(&self, notification: StateChanged) -> usize {
        self.tx.send(notification).unwrap_or_default()
    }

    /// Returns a receiver of all future notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChanged> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StateBroadcast {
    fn default() -> Self {
        Self::new(1024)
    }
}
