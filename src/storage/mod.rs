//! Durable key-value slots shared by every shopkeep process of a user
//!
//! A slot is one named string value. Backends broadcast a [`StorageEvent`]
//! when a slot is changed by *another* process, the same way a browser only
//! fires `storage` events in the other tabs of an origin.

#[cfg(test)]
pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::StorageError;

/// Capacity of the change feed before slow subscribers start lagging
const EVENT_CAPACITY: usize = 64;

/// A slot was written or removed by another process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
}

/// Synchronous key-value backend
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, `None` when it was never written or has been removed
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing a missing slot succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Subscribe to changes made by other processes
    fn subscribe(&self) -> StorageSubscription;
}

/// Live subscription to a backend's change feed.
///
/// Dropping it unsubscribes.
pub struct StorageSubscription {
    rx: broadcast::Receiver<StorageEvent>,
}

impl StorageSubscription {
    pub(crate) fn new(rx: broadcast::Receiver<StorageEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event, `None` once the backend is gone.
    ///
    /// A lagging subscriber skips the events it missed; consumers re-read the
    /// slot on every event so nothing but the intermediate values is lost.
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Storage subscriber lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Create the sending half of a change feed
pub(crate) fn event_channel() -> broadcast::Sender<StorageEvent> {
    let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
    tx
}

/// Background task polling a backend for external changes.
///
/// The task stops when the handle is dropped or [`stop`](Self::stop)ped.
pub struct WatcherHandle {
    task: JoinHandle<()>,
}

impl WatcherHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
