//! Store models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Postal address of a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub state: String,
}

/// Seller's store profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub address: Address,

    #[serde(default)]
    pub main_good: String,

    #[serde(default)]
    pub descr: String,

    #[serde(default)]
    pub avg_rating: f64,

    #[serde(default)]
    pub is_open: bool,

    /// Hosted image URLs
    #[serde(default, rename = "imgs")]
    pub images: Vec<String>,

    /// Rating objects, opaque to this client
    #[serde(default)]
    pub ratings: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Store creation form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    pub name: String,
    pub main_good: String,
    pub address: Address,
    pub descr: String,
}

/// Envelope returned by the store creation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse {
    pub data: Store,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
