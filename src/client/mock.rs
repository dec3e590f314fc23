//! Mock storefront API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{AuthApi, CatalogApi, StoreApi};
use super::models::{
    AuthResponse, Credentials, NewProduct, SignupProfile, StoreProfile, StoreResponse,
};
use crate::error::AuthError;

/// One scripted answer, optionally delayed to simulate a slow network
struct Scripted<T> {
    delay: Option<Duration>,
    result: Result<T, AuthError>,
}

type Queue<T> = Arc<Mutex<VecDeque<Scripted<T>>>>;

/// Mock API client for testing.
///
/// Queue answers per endpoint with the builder methods; each call pops the
/// next one. A call with nothing queued fails with `AuthError::Unexpected`.
///
/// # Example
/// ```ignore
/// let mock = MockStorefrontClient::new()
///     .with_sign_in(Ok(AuthRecordBuilder::new().build_response()))
///     .await;
///
/// let response = mock.sign_in(&credentials).await?;
/// ```
#[derive(Default)]
pub struct MockStorefrontClient {
    sign_in: Queue<AuthResponse>,
    register: Queue<AuthResponse>,
    create_store: Queue<StoreResponse>,
    create_product: Queue<serde_json::Value>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CallCounts {
    pub sign_in: usize,
    pub register: usize,
    pub create_store: usize,
    pub create_product: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.sign_in + self.register + self.create_store + self.create_product
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "sign_in", "create_store")
    pub method: String,
    /// Bearer token sent, if any
    pub access_token: Option<String>,
    /// Request body as JSON
    pub body: serde_json::Value,
}

impl MockStorefrontClient {
    /// Create a new mock client with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for sign_in.
    pub async fn with_sign_in(self, result: Result<AuthResponse, AuthError>) -> Self {
        push(&self.sign_in, None, result).await;
        self
    }

    /// Queue an answer for sign_in that arrives after `delay`.
    pub async fn with_delayed_sign_in(
        self,
        delay: Duration,
        result: Result<AuthResponse, AuthError>,
    ) -> Self {
        push(&self.sign_in, Some(delay), result).await;
        self
    }

    /// Queue an answer for register.
    pub async fn with_register(self, result: Result<AuthResponse, AuthError>) -> Self {
        push(&self.register, None, result).await;
        self
    }

    /// Queue an answer for create_store.
    pub async fn with_create_store(self, result: Result<StoreResponse, AuthError>) -> Self {
        push(&self.create_store, None, result).await;
        self
    }

    /// Queue an answer for create_product.
    pub async fn with_create_product(
        self,
        result: Result<serde_json::Value, AuthError>,
    ) -> Self {
        push(&self.create_product, None, result).await;
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    async fn capture<B: serde::Serialize>(
        &self,
        method: &str,
        access_token: Option<&str>,
        body: &B,
    ) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            access_token: access_token.map(String::from),
            body: serde_json::to_value(body).unwrap_or(serde_json::Value::Null),
        });
    }
}

async fn push<T>(queue: &Queue<T>, delay: Option<Duration>, result: Result<T, AuthError>) {
    queue.lock().await.push_back(Scripted { delay, result });
}

/// Pop the next answer and wait out its delay outside the lock
async fn answer<T>(queue: &Queue<T>, method: &str) -> Result<T, AuthError> {
    let next = queue.lock().await.pop_front();
    match next {
        Some(Scripted { delay, result }) => {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
        None => Err(AuthError::Unexpected(format!("no answer queued for {}", method))),
    }
}

#[async_trait]
impl AuthApi for MockStorefrontClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        self.call_count.lock().await.sign_in += 1;
        self.capture("sign_in", None, credentials).await;
        answer(&self.sign_in, "sign_in").await
    }

    async fn register(&self, profile: &SignupProfile) -> Result<AuthResponse, AuthError> {
        self.call_count.lock().await.register += 1;
        self.capture("register", None, profile).await;
        answer(&self.register, "register").await
    }
}

#[async_trait]
impl StoreApi for MockStorefrontClient {
    async fn create_store(
        &self,
        access_token: &str,
        profile: &StoreProfile,
    ) -> Result<StoreResponse, AuthError> {
        self.call_count.lock().await.create_store += 1;
        self.capture("create_store", Some(access_token), profile).await;
        answer(&self.create_store, "create_store").await
    }
}

#[async_trait]
impl CatalogApi for MockStorefrontClient {
    async fn create_product(
        &self,
        access_token: &str,
        store_id: &str,
        product: &NewProduct,
    ) -> Result<serde_json::Value, AuthError> {
        self.call_count.lock().await.create_product += 1;
        let mut body = serde_json::to_value(product).unwrap_or(serde_json::Value::Null);
        body["storeId"] = serde_json::Value::String(store_id.to_string());
        self.capture("create_product", Some(access_token), &body).await;
        answer(&self.create_product, "create_product").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::AuthRecordBuilder;

    fn credentials() -> Credentials {
        Credentials {
            email: "user@x.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_answers_in_queue_order() {
        let mock = MockStorefrontClient::new()
            .with_sign_in(Ok(AuthRecordBuilder::new().build_response()))
            .await
            .with_sign_in(Err(AuthError::Network("down".to_string())))
            .await;

        assert!(mock.sign_in(&credentials()).await.is_ok());
        assert!(matches!(
            mock.sign_in(&credentials()).await,
            Err(AuthError::Network(_))
        ));
        assert!(matches!(
            mock.sign_in(&credentials()).await,
            Err(AuthError::Unexpected(_))
        ));
        assert_eq!(mock.call_counts().await.sign_in, 3);
    }

    #[tokio::test]
    async fn test_captures_requests() {
        let mock = MockStorefrontClient::new()
            .with_create_product(Ok(serde_json::json!({ "ok": true })))
            .await;

        let product = NewProduct {
            price: 100.0,
            discount: 5,
            descr: "Pasta Pack".to_string(),
            imgs: vec![],
        };
        mock.create_product("at", "s1", &product).await.unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].method, "create_product");
        assert_eq!(captured[0].access_token.as_deref(), Some("at"));
        assert_eq!(captured[0].body["storeId"], "s1");
        assert_eq!(mock.call_counts().await.total(), 1);
    }
}
