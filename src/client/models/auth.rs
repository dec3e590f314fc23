//! Authentication models
//!
//! [`AuthRecord`] is both the payload of the sign-in and registration
//! endpoints and the value persisted in the session slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::Store;

/// Signed-in identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Tokens, expirations, user and optional store of one session.
///
/// Both expirations are required: a record missing either one does not
/// decode and is treated as no session at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub refresh_token: Option<String>,

    pub access_expiration: DateTime<Utc>,

    pub refresh_expiration: DateTime<Utc>,

    #[serde(default)]
    pub user: Option<User>,

    /// `None` until the seller has created a store
    #[serde(default)]
    pub store: Option<Store>,
}

impl AuthRecord {
    /// Access token, treating an empty string as absent
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Refresh token, treating an empty string as absent
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn store_id(&self) -> Option<&str> {
        self.store
            .as_ref()
            .map(|s| s.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn store_name(&self) -> Option<&str> {
        self.store
            .as_ref()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Expired once `now` reaches the expiration instant
    pub fn is_access_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.access_expiration
    }

    pub fn is_refresh_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.refresh_expiration
    }

    /// Both tokens present and the refresh token still valid.
    ///
    /// An expired access token alone does not end the session.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.access_token().is_some()
            && self.refresh_token().is_some()
            && !self.is_refresh_expired_at(now)
    }

    /// Whole minutes until the access token expires, never negative
    pub fn access_minutes_left_at(&self, now: DateTime<Utc>) -> i64 {
        let remaining = self.access_expiration - now;
        remaining.num_minutes().max(0)
    }

    /// Access token expired while the refresh token is still usable.
    ///
    /// The storefront API has no refresh endpoint yet; this is where a
    /// refresh call would be triggered.
    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        self.is_access_expired_at(now) && self.is_authenticated_at(now)
    }
}

/// Envelope returned by the sign-in and registration endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub data: AuthRecord,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Sign-in form
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account type chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    StoreOwner,
}

/// Registration form
#[derive(Debug, Clone, Serialize)]
pub struct SignupProfile {
    pub username: String,
    pub email: String,
    pub password: String,

    /// Only checked locally, never sent
    #[serde(skip)]
    pub confirm_password: String,

    pub role: Role,
}
