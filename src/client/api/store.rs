//! Store API trait

use async_trait::async_trait;

use crate::client::models::{StoreProfile, StoreResponse};
use crate::error::AuthError;

/// Store operations for the storefront API
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Create the signed-in seller's store
    async fn create_store(
        &self,
        access_token: &str,
        profile: &StoreProfile,
    ) -> Result<StoreResponse, AuthError>;
}
