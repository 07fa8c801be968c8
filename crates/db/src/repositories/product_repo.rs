//! Repository for the `products` table.

use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, barcode, brand, model, created_at, updated_at";

/// Provides lookup and insert operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (barcode, brand, model)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.barcode)
            .bind(&input.brand)
            .bind(&input.model)
            .fetch_one(pool)
            .await
    }

    /// Find a product by barcode (exact match).
    pub async fn find_by_barcode(
        pool: &PgPool,
        barcode: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE barcode = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(barcode)
            .fetch_optional(pool)
            .await
    }
}
