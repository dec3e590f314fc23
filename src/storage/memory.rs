//! In-memory key-value store for testing
//!
//! Writes through the [`KeyValueStore`] trait behave like the local process;
//! the `simulate_external_*` methods behave like another process and emit
//! change events.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

use super::{KeyValueStore, StorageEvent, StorageSubscription, event_channel};
use crate::error::StorageError;

pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            events: event_channel(),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail, like a full quota
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Write a slot as another process would
    pub fn simulate_external_write(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
        });
    }

    /// Remove a slot as another process would
    pub fn simulate_external_remove(&self, key: &str) {
        self.slots.lock().unwrap().remove(key);
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
        });
    }

    /// Raw slot contents, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("read failed".to_string()));
        }
        Ok(self.slots.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.slots.lock().unwrap().remove(key);
        Ok(())
    }

    fn subscribe(&self) -> StorageSubscription {
        StorageSubscription::new(self.events.subscribe())
    }
}
