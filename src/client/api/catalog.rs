//! Catalog API trait

use async_trait::async_trait;

use crate::client::models::NewProduct;
use crate::error::AuthError;

/// Product operations for the storefront API
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Add a product to a store. The response body is returned as-is.
    async fn create_product(
        &self,
        access_token: &str,
        store_id: &str,
        product: &NewProduct,
    ) -> Result<serde_json::Value, AuthError>;
}
