//! Session slot persistence

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client::models::AuthRecord;
use crate::storage::{KeyValueStore, StorageSubscription};

/// Slot holding the current session
pub const SESSION_KEY: &str = "loginResponse";

/// Slot caching the last raw registration response
pub const SIGNUP_RESPONSE_KEY: &str = "signupResponse";

/// Slot caching the last raw store creation response
pub const CREATE_STORE_RESPONSE_KEY: &str = "createStoreResponse";

/// On-disk shape of the session slot, shared with the web client
#[derive(Serialize)]
struct EnvelopeRef<'a> {
    data: &'a AuthRecord,
}

#[derive(Deserialize)]
struct Envelope {
    data: AuthRecord,
}

/// Reads and writes the one persisted [`AuthRecord`].
///
/// Storage failures stop here: reads report them as "no session" and writes
/// as `false`, with a log line for diagnosis.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Current session, `None` if absent, unreadable or corrupt
    pub fn read(&self) -> Option<AuthRecord> {
        let raw = match self.backend.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Error reading session from storage: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Envelope>(&raw) {
            Ok(envelope) => Some(envelope.data),
            Err(e) => {
                log::warn!("Ignoring corrupt session data: {}", e);
                None
            }
        }
    }

    /// Persist a session, replacing any previous one
    pub fn write(&self, record: &AuthRecord) -> bool {
        let raw = match serde_json::to_string(&EnvelopeRef { data: record }) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Error serializing session: {}", e);
                return false;
            }
        };

        match self.backend.set(SESSION_KEY, &raw) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Error writing session to storage: {}", e);
                false
            }
        }
    }

    /// Remove the session. Succeeds when there was none.
    pub fn clear(&self) -> bool {
        match self.backend.remove(SESSION_KEY) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Error clearing session from storage: {}", e);
                false
            }
        }
    }

    /// Changes made to any slot by other processes
    pub fn subscribe(&self) -> StorageSubscription {
        self.backend.subscribe()
    }

    /// Keep the raw body of a response for later inspection. Best effort.
    pub fn cache_response(&self, key: &str, body: &serde_json::Value) {
        if let Err(e) = self.backend.set(key, &body.to_string()) {
            log::warn!("Failed to cache response under {}: {}", key, e);
        }
    }

    /// Last body cached under `key`, `None` if absent, unreadable or corrupt
    pub fn cached_response(&self, key: &str) -> Option<serde_json::Value> {
        let raw = self
            .backend
            .get(key)
            .inspect_err(|e| log::warn!("Error reading cached response {}: {}", key, e))
            .ok()??;

        serde_json::from_str(&raw)
            .inspect_err(|e| log::warn!("Ignoring corrupt cached response {}: {}", key, e))
            .ok()
    }
}
