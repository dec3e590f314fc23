//! Point-in-time views of the stored session
//!
//! Every accessor performs its own read of the slot.

use chrono::{DateTime, Utc};

use super::SessionStore;
use crate::client::models::{Store, User};

impl SessionStore {
    pub fn access_token(&self) -> Option<String> {
        self.read()?.access_token().map(String::from)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read()?.refresh_token().map(String::from)
    }

    pub fn user(&self) -> Option<User> {
        self.read()?.user
    }

    pub fn user_id(&self) -> Option<String> {
        self.read()?.user_id().map(String::from)
    }

    pub fn store(&self) -> Option<Store> {
        self.read()?.store
    }

    pub fn store_id(&self) -> Option<String> {
        self.read()?.store_id().map(String::from)
    }

    pub fn store_name(&self) -> Option<String> {
        self.read()?.store_name().map(String::from)
    }

    pub fn access_expiration(&self) -> Option<DateTime<Utc>> {
        Some(self.read()?.access_expiration)
    }

    pub fn refresh_expiration(&self) -> Option<DateTime<Utc>> {
        Some(self.read()?.refresh_expiration)
    }

    /// True when no session is stored or its access token has expired
    pub fn is_access_token_expired(&self) -> bool {
        self.read()
            .is_none_or(|record| record.is_access_expired_at(Utc::now()))
    }

    /// True when no session is stored or its refresh token has expired
    pub fn is_refresh_token_expired(&self) -> bool {
        self.read()
            .is_none_or(|record| record.is_refresh_expired_at(Utc::now()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.read()
            .is_some_and(|record| record.is_authenticated_at(Utc::now()))
    }

    /// True when the access token expired but the session can still be renewed
    pub fn needs_refresh(&self) -> bool {
        self.read()
            .is_some_and(|record| record.needs_refresh_at(Utc::now()))
    }

    /// Whole minutes until the access token expires, 0 without a session
    pub fn access_token_time_left(&self) -> i64 {
        self.read()
            .map_or(0, |record| record.access_minutes_left_at(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{AuthRecordBuilder, StoreBuilder};
    use crate::session::SESSION_KEY;
    use crate::storage::{KeyValueStore, MemoryStore};
    use chrono::Duration;
    use std::sync::Arc;

    fn session_with(record: Option<crate::client::models::AuthRecord>) -> SessionStore {
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        if let Some(record) = record {
            assert!(session.write(&record));
        }
        session
    }

    #[test]
    fn test_all_accessors_empty_without_session() {
        let session = session_with(None);

        assert_eq!(session.access_token(), None);
        assert_eq!(session.refresh_token(), None);
        assert_eq!(session.user(), None);
        assert_eq!(session.user_id(), None);
        assert_eq!(session.store(), None);
        assert_eq!(session.store_id(), None);
        assert_eq!(session.store_name(), None);
        assert_eq!(session.access_expiration(), None);
        assert_eq!(session.refresh_expiration(), None);
        assert!(session.is_access_token_expired());
        assert!(session.is_refresh_token_expired());
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token_time_left(), 0);
    }

    #[test]
    fn test_accessors_project_fields() {
        let record = AuthRecordBuilder::new()
            .store(StoreBuilder::new("s1").name("Mama's Pantry").build())
            .build();
        let session = session_with(Some(record.clone()));

        assert_eq!(session.access_token().as_deref(), Some("a"));
        assert_eq!(session.refresh_token().as_deref(), Some("b"));
        assert_eq!(session.user_id().as_deref(), Some("u1"));
        assert_eq!(session.user(), record.user);
        assert_eq!(session.store_id().as_deref(), Some("s1"));
        assert_eq!(session.store_name().as_deref(), Some("Mama's Pantry"));
        assert_eq!(session.access_expiration(), Some(record.access_expiration));
        assert_eq!(session.refresh_expiration(), Some(record.refresh_expiration));
        assert!(!session.is_access_token_expired());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_expired_access_token_keeps_session_authenticated() {
        let record = AuthRecordBuilder::new()
            .access_expires_in(Duration::minutes(-1))
            .refresh_expires_in(Duration::minutes(60))
            .build();
        let session = session_with(Some(record));

        assert!(session.is_access_token_expired());
        assert!(!session.is_refresh_token_expired());
        assert!(session.is_authenticated());
        assert!(session.needs_refresh());
        assert_eq!(session.access_token_time_left(), 0);
        assert_eq!(session.store_id(), None);
    }

    #[test]
    fn test_needs_refresh_only_for_renewable_sessions() {
        assert!(!session_with(None).needs_refresh());
        assert!(!session_with(Some(AuthRecordBuilder::new().build())).needs_refresh());

        let lapsed = AuthRecordBuilder::new()
            .access_expires_in(Duration::minutes(-10))
            .refresh_expires_in(Duration::minutes(-1))
            .build();
        assert!(!session_with(Some(lapsed)).needs_refresh());

        let tokenless = AuthRecordBuilder::new()
            .access_expires_in(Duration::minutes(-10))
            .refresh_token(None)
            .build();
        assert!(!session_with(Some(tokenless)).needs_refresh());
    }

    #[test]
    fn test_expired_refresh_token_deauthenticates() {
        let record = AuthRecordBuilder::new()
            .refresh_expires_in(Duration::seconds(-1))
            .build();
        let session = session_with(Some(record));

        assert!(session.is_refresh_token_expired());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_missing_token_deauthenticates() {
        let session = session_with(Some(AuthRecordBuilder::new().access_token(None).build()));
        assert!(!session.is_authenticated());

        let session = session_with(Some(AuthRecordBuilder::new().refresh_token(Some("")).build()));
        assert!(!session.is_authenticated());
        assert_eq!(session.refresh_token(), None);
    }

    #[test]
    fn test_time_left_in_whole_minutes() {
        let record = AuthRecordBuilder::new()
            .access_expires_in(Duration::minutes(30) + Duration::seconds(30))
            .build();
        let session = session_with(Some(record));

        let left = session.access_token_time_left();
        assert!(left == 30 || left == 29, "unexpected minutes left: {}", left);
    }

    #[test]
    fn test_corrupt_slot_reads_as_signed_out() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(SESSION_KEY, "{{{").unwrap();
        let session = SessionStore::new(backend);

        assert_eq!(session.access_token(), None);
        assert!(!session.is_authenticated());
        assert!(session.is_access_token_expired());
    }

    #[test]
    fn test_accessors_follow_later_writes() {
        let session = session_with(Some(AuthRecordBuilder::new().build()));
        assert_eq!(session.store_id(), None);

        let updated = AuthRecordBuilder::new()
            .store(StoreBuilder::new("s9").build())
            .build();
        assert!(session.write(&updated));
        assert_eq!(session.store_id().as_deref(), Some("s9"));
    }
}
