//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AuthResponse, Credentials, SignupProfile};
use crate::error::AuthError;

/// Authentication operations for the storefront API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange email and password for a session
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError>;

    /// Create an account and return its first session
    async fn register(&self, profile: &SignupProfile) -> Result<AuthResponse, AuthError>;
}
