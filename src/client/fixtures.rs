//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

use chrono::{DateTime, Duration, Utc};

use super::models::{Address, AuthRecord, AuthResponse, Store, User};

// ============================================================================
// AuthRecordBuilder
// ============================================================================

/// Builder for [`AuthRecord`] with a valid session by default.
///
/// Expirations are relative to the builder's `now`: access in 15 minutes,
/// refresh in 60 minutes.
///
/// # Example
/// ```ignore
/// let record = AuthRecordBuilder::new()
///     .access_expires_in(Duration::minutes(-1))
///     .store(StoreBuilder::new("s1").build())
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AuthRecordBuilder {
    now: DateTime<Utc>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    access_in: Duration,
    refresh_in: Duration,
    user_id: Option<String>,
    store: Option<Store>,
}

impl Default for AuthRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthRecordBuilder {
    pub fn new() -> Self {
        Self {
            now: Utc::now(),
            access_token: Some("a".to_string()),
            refresh_token: Some("b".to_string()),
            access_in: Duration::minutes(15),
            refresh_in: Duration::minutes(60),
            user_id: Some("u1".to_string()),
            store: None,
        }
    }

    pub fn access_token(mut self, token: Option<&str>) -> Self {
        self.access_token = token.map(String::from);
        self
    }

    pub fn refresh_token(mut self, token: Option<&str>) -> Self {
        self.refresh_token = token.map(String::from);
        self
    }

    pub fn access_expires_in(mut self, delta: Duration) -> Self {
        self.access_in = delta;
        self
    }

    pub fn refresh_expires_in(mut self, delta: Duration) -> Self {
        self.refresh_in = delta;
        self
    }

    pub fn user_id(mut self, id: Option<&str>) -> Self {
        self.user_id = id.map(String::from);
        self
    }

    pub fn store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> AuthRecord {
        AuthRecord {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            access_expiration: self.now + self.access_in,
            refresh_expiration: self.now + self.refresh_in,
            user: self.user_id.map(|id| User {
                id,
                created_at: Some(self.now),
            }),
            store: self.store,
        }
    }

    /// Wrap the record in the sign-in response envelope
    pub fn build_response(self) -> AuthResponse {
        AuthResponse {
            data: self.build(),
            message: Some("Login successful".to_string()),
        }
    }
}

// ============================================================================
// StoreBuilder
// ============================================================================

/// Builder for [`Store`]
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    id: String,
    name: String,
    owner: String,
    main_good: String,
}

impl StoreBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("Store {}", &id),
            id,
            owner: "u1".to_string(),
            main_good: "food".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Store {
        Store {
            id: self.id,
            name: self.name,
            owner: self.owner,
            address: Address {
                city: "Ikeja".to_string(),
                address: "1 Allen Avenue".to_string(),
                state: "Lagos".to_string(),
            },
            main_good: self.main_good,
            descr: "Fresh groceries every day".to_string(),
            avg_rating: 0.0,
            is_open: true,
            images: Vec::new(),
            ratings: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}
