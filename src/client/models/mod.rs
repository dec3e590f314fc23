//! Storefront API data models
//!
//! Request and response types for the storefront API, organized by resource.

mod auth;
mod product;
mod store;

pub use auth::{AuthRecord, AuthResponse, Credentials, Role, SignupProfile, User};
pub use product::NewProduct;
pub use store::{Address, Store, StoreProfile, StoreResponse};
