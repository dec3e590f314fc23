//! Auth state provider
//!
//! [`AuthProvider`] is the single writer of the session slot. It runs every
//! sign-in, registration, store creation and logout, and publishes the
//! resulting [`AuthState`] on a `watch` channel before the operation returns.
//!
//! Changes to the slot made by other processes reach the provider through
//! the storage change feed and are republished as-is: last writer wins.
//!
//! Operations that talk to the API take a ticket from a counter. When an
//! answer arrives after a newer operation (or a logout) was started, it is
//! dropped with [`AuthError::Superseded`] and never touches the slot.

mod state;

pub use state::{AuthState, Landing};

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::StorefrontApi;
use crate::client::models::{AuthRecord, Credentials, SignupProfile, Store, StoreProfile};
use crate::error::{AuthError, Result};
use crate::session::{CREATE_STORE_RESPONSE_KEY, SESSION_KEY, SIGNUP_RESPONSE_KEY, SessionStore};
use crate::validation;

/// Observable holder of the current session
pub struct AuthProvider<A> {
    api: Arc<A>,
    session: SessionStore,
    state: Arc<StateCell>,
    sequence: AtomicU64,
    sync_task: JoinHandle<()>,
}

/// The published snapshot plus a counter bumped on every publish.
///
/// Both are only changed under the channel's write lock, so a reload that
/// started before a newer publish can detect it and back off.
struct StateCell {
    tx: watch::Sender<AuthState>,
    generation: AtomicU64,
}

impl StateCell {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::Uninitialized);
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn publish(&self, next: AuthState) {
        log::debug!("Auth state -> {}", next.name());
        self.tx.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = next;
        });
    }

    /// Publish unless something else was published since `seen`
    fn publish_if_unchanged(&self, seen: u64, next: AuthState) -> bool {
        self.tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != seen {
                log::debug!("Dropping stale reload, state moved on");
                return false;
            }
            log::debug!("Auth state -> {}", next.name());
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = next;
            true
        })
    }
}

impl<A: StorefrontApi + 'static> AuthProvider<A> {
    /// Build a provider, load the stored session and start following
    /// changes made by other processes.
    pub async fn start(api: Arc<A>, session: SessionStore) -> Self {
        let state = Arc::new(StateCell::new());
        state.publish(AuthState::Loading);

        // Subscribe before the first read so no external change slips between
        let mut changes = session.subscribe();

        let initial = reload(&session)
            .await
            .unwrap_or(AuthState::Unauthenticated);
        state.publish(initial);

        let sync_task = tokio::spawn({
            let session = session.clone();
            let state = Arc::clone(&state);
            async move {
                while let Some(event) = changes.recv().await {
                    if event.key != SESSION_KEY {
                        continue;
                    }
                    log::debug!("Session changed in another process, reloading");
                    let seen = state.generation();
                    if let Some(next) = reload(&session).await {
                        state.publish_if_unchanged(seen, next);
                    }
                }
            }
        });

        Self {
            api,
            session,
            state,
            sequence: AtomicU64::new(0),
            sync_task,
        }
    }

    /// Current snapshot
    pub fn state(&self) -> AuthState {
        self.state.tx.borrow().clone()
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.tx.subscribe()
    }

    /// The session store this provider writes to
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sign in. The state is left untouched on any failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<Landing> {
        validation::validate_credentials(credentials)?;

        let ticket = self.next_ticket();
        let response = self.api.sign_in(credentials).await.inspect_err(|e| {
            log::warn!("Login failed: {}", e.detail());
        })?;
        self.ensure_current(ticket)?;

        let landing = Landing::after_login(&response.data);
        self.commit(response.data)?;
        Ok(landing)
    }

    /// Register a new account and sign it in
    pub async fn signup(&self, profile: &SignupProfile) -> Result<Landing> {
        validation::validate_signup(profile)?;

        let ticket = self.next_ticket();
        let response = self.api.register(profile).await.inspect_err(|e| {
            log::warn!("Signup failed: {}", e.detail());
        })?;
        self.ensure_current(ticket)?;

        if let Ok(body) = serde_json::to_value(&response) {
            self.session.cache_response(SIGNUP_RESPONSE_KEY, &body);
        }
        self.commit(response.data)?;
        Ok(Landing::after_signup(profile.role))
    }

    /// Create the seller's store and attach it to the session
    pub async fn create_store(&self, profile: &StoreProfile) -> Result<Store> {
        validation::validate_store(profile)?;

        let token = self
            .current_record()
            .and_then(|record| record.access_token().map(String::from))
            .ok_or(AuthError::NotAuthenticated)?;

        let ticket = self.next_ticket();
        let response = self
            .api
            .create_store(&token, profile)
            .await
            .inspect_err(|e| {
                log::warn!("Store creation failed: {}", e.detail());
            })?;
        self.ensure_current(ticket)?;

        if let Ok(body) = serde_json::to_value(&response) {
            self.session.cache_response(CREATE_STORE_RESPONSE_KEY, &body);
        }

        let mut record = self.current_record().ok_or(AuthError::NotAuthenticated)?;
        record.store = Some(response.data.clone());
        self.commit(record)?;

        Ok(response.data)
    }

    /// Sign out. Always ends unauthenticated, even if the slot could not be
    /// cleared.
    pub fn logout(&self) {
        self.next_ticket();
        if !self.session.clear() {
            log::warn!("Session could not be cleared from storage");
        }
        self.state.publish(AuthState::Unauthenticated);
    }

    /// Stop following external changes. Also happens on drop.
    pub fn shutdown(&self) {
        self.sync_task.abort();
    }

    fn current_record(&self) -> Option<AuthRecord> {
        self.state.tx.borrow().record().cloned()
    }

    fn next_ticket(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn ensure_current(&self, ticket: u64) -> std::result::Result<(), AuthError> {
        if self.sequence.load(Ordering::SeqCst) != ticket {
            log::debug!("Dropping stale response for request #{}", ticket);
            return Err(AuthError::Superseded);
        }
        Ok(())
    }

    /// Persist, then publish. Nothing is published if the write fails.
    ///
    /// A record the accessors would not consider authenticated is refused
    /// before it reaches the slot.
    fn commit(&self, record: AuthRecord) -> std::result::Result<(), AuthError> {
        if !record.is_authenticated_at(Utc::now()) {
            return Err(AuthError::Unexpected(
                "response carried no usable session".to_string(),
            ));
        }
        if !self.session.write(&record) {
            return Err(AuthError::Unexpected(
                "session could not be written to storage".to_string(),
            ));
        }
        self.state.publish(AuthState::Authenticated(record));
        Ok(())
    }
}

impl<A> Drop for AuthProvider<A> {
    fn drop(&mut self) {
        self.sync_task.abort();
    }
}

/// Run [`load_state`] off the async workers. `None` if the task failed.
async fn reload(session: &SessionStore) -> Option<AuthState> {
    let session = session.clone();
    tokio::task::spawn_blocking(move || load_state(&session))
        .await
        .inspect_err(|e| log::warn!("Loading stored session failed: {}", e))
        .ok()
}

/// Read the slot and decide the state it represents.
///
/// A session whose refresh token has expired is removed from storage.
fn load_state(session: &SessionStore) -> AuthState {
    let Some(record) = session.read() else {
        return AuthState::Unauthenticated;
    };

    let now = Utc::now();
    if record.is_authenticated_at(now) {
        return AuthState::Authenticated(record);
    }

    if record.is_refresh_expired_at(now) {
        log::info!("Stored session has expired, removing it");
        if !session.clear() {
            log::warn!("Expired session could not be cleared from storage");
        }
    }
    AuthState::Unauthenticated
}
