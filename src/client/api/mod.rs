//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Sign-in and registration
//! - [`StoreApi`] - Store profile operations
//! - [`CatalogApi`] - Product operations
//!
//! The [`StorefrontApi`](super::StorefrontApi) super-trait combines all three.

mod auth;
mod catalog;
mod store;

pub use auth::AuthApi;
pub use catalog::CatalogApi;
pub use store::StoreApi;
