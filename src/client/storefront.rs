//! Storefront API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, CatalogApi, StoreApi};
use super::models::{
    AuthResponse, Credentials, NewProduct, SignupProfile, StoreProfile, StoreResponse,
};
use crate::error::{AuthError, Result};

/// Which call failed, for picking the fallback error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    SignIn,
    Register,
    CreateStore,
    CreateProduct,
}

impl Operation {
    /// Shown when a rejection carries no message of its own
    fn fallback_message(self) -> &'static str {
        match self {
            Operation::SignIn => "Login failed",
            Operation::Register => "Registration failed",
            Operation::CreateStore => "Failed to create store",
            Operation::CreateProduct => "Failed to create product",
        }
    }
}

/// Storefront API client
pub struct StorefrontClient {
    http: HttpClient,
    base_url: String,
}

impl StorefrontClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body and decode the JSON answer
    async fn post<B, T>(
        &self,
        op: Operation,
        path: &str,
        access_token: Option<&str>,
        body: &B,
    ) -> std::result::Result<T, AuthError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(AuthError::from)?;
        let status = response.status();

        let text = response.text().await.map_err(|e| {
            AuthError::Network(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            let message = rejection_message(&text, op);
            log::debug!("{:?} rejected with {}: {}", op, status, text);
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            AuthError::Unexpected(format!(
                "Failed to parse {:?} response: {}. Body was: {}",
                op, e, text
            ))
        })
    }
}

/// The body's `message`, else its `error`, else the operation's fallback.
///
/// Empty strings count as missing.
fn rejection_message(body: &str, op: Operation) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    field("message")
        .or_else(|| field("error"))
        .unwrap_or_else(|| op.fallback_message().to_string())
}

#[async_trait]
impl AuthApi for StorefrontClient {
    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<AuthResponse, AuthError> {
        self.post(Operation::SignIn, "/api/stores/owner/signin", None, credentials)
            .await
    }

    async fn register(
        &self,
        profile: &SignupProfile,
    ) -> std::result::Result<AuthResponse, AuthError> {
        self.post(Operation::Register, "/api/stores/owner/create", None, profile)
            .await
    }
}

#[async_trait]
impl StoreApi for StorefrontClient {
    async fn create_store(
        &self,
        access_token: &str,
        profile: &StoreProfile,
    ) -> std::result::Result<StoreResponse, AuthError> {
        self.post(Operation::CreateStore, "/api/stores", Some(access_token), profile)
            .await
    }
}

#[async_trait]
impl CatalogApi for StorefrontClient {
    async fn create_product(
        &self,
        access_token: &str,
        store_id: &str,
        product: &NewProduct,
    ) -> std::result::Result<serde_json::Value, AuthError> {
        let path = format!("/api/products/{}", store_id);
        self.post(Operation::CreateProduct, &path, Some(access_token), product)
            .await
    }
}
