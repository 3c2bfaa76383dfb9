//! Repository for the `products` table.
//!
//! Nothing here writes `quantity`; see [`crate::ledger`] for that.

use campus_core::inventory::{ISSUE_ISSUED, PURCHASE_COMPLETED, SALE_PAID};
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campus_id, name, sku, category_id, store_id, unit_id, \
    quantity, unit_price, created_at, updated_at";

/// Campus-scoped CRUD for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product on `campus_id` with zero stock.
    pub async fn create(
        pool: &PgPool,
        campus_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (campus_id, name, sku, category_id, store_id, unit_id, unit_price)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(campus_id)
            .bind(&input.name)
            .bind(&input.sku)
            .bind(input.category_id)
            .bind(input.store_id)
            .bind(input.unit_id)
            .bind(input.unit_price)
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID within a campus.
    pub async fn find_by_id(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND campus_id = $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// List products on a campus by name.
    pub async fn list_by_campus(
        pool: &PgPool,
        campus_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE campus_id = $1
             ORDER BY name ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(campus_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update descriptive product fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($3, name),
                sku = COALESCE($4, sku),
                category_id = COALESCE($5, category_id),
                store_id = COALESCE($6, store_id),
                unit_id = COALESCE($7, unit_id),
                unit_price = COALESCE($8, unit_price)
             WHERE id = $1 AND campus_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(campus_id)
            .bind(&input.name)
            .bind(&input.sku)
            .bind(input.category_id)
            .bind(input.store_id)
            .bind(input.unit_id)
            .bind(input.unit_price)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Fails with a foreign-key violation while ledger rows
    /// still reference it.
    pub async fn delete(pool: &PgPool, campus_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND campus_id = $2")
            .bind(id)
            .bind(campus_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sum of committed stock effects across purchases, sales, and issues.
    ///
    /// At every commit point this equals the product's stored `quantity`.
    pub async fn ledger_total(pool: &PgPool, product_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT (
                COALESCE((SELECT SUM(quantity) FROM purchases WHERE product_id = $1 AND status = $2), 0)
              - COALESCE((SELECT SUM(quantity) FROM sales WHERE product_id = $1 AND status = $3), 0)
              - COALESCE((SELECT SUM(quantity) FROM issues WHERE product_id = $1 AND status = $4), 0)
             )::BIGINT",
        )
        .bind(product_id)
        .bind(PURCHASE_COMPLETED)
        .bind(SALE_PAID)
        .bind(ISSUE_ISSUED)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
