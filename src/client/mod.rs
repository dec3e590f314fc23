//! Storefront API client
//!
//! The API surface is split into focused traits (see [`api`]) combined by
//! [`StorefrontApi`], so the auth provider and the commands can run against
//! the real [`StorefrontClient`] or a test double.

pub mod api;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod storefront;

pub use api::{AuthApi, CatalogApi, StoreApi};
#[cfg(test)]
pub use mock::MockStorefrontClient;
pub use storefront::StorefrontClient;

/// Full storefront API, implemented by anything covering all three traits
pub trait StorefrontApi: AuthApi + StoreApi + CatalogApi {}

impl<T: AuthApi + StoreApi + CatalogApi> StorefrontApi for T {}
