//! Product models

use serde::Serialize;

/// Product creation form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub price: f64,

    /// Percentage off, 0-100
    pub discount: u8,

    pub descr: String,

    /// Already-hosted image URLs
    pub imgs: Vec<String>,
}
