//! Product entity model and DTOs.
//!
//! Products are looked up by barcode during guest login; a guest account is
//! keyed deterministically off the barcode of the product being repaired.

use serde::Serialize;
use sqlx::FromRow;
use vfix_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub barcode: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug)]
pub struct CreateProduct {
    pub barcode: String,
    pub brand: Option<String>,
    pub model: Option<String>,
}
