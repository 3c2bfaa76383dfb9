//! Product model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A product row from the `products` table.
///
/// `quantity` is owned by the stock ledger; neither DTO below can set it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub campus_id: DbId,
    pub name: String,
    pub sku: Option<String>,
    pub category_id: Option<DbId>,
    pub store_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    pub quantity: i64,
    pub unit_price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product. Stock starts at zero.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    pub campus_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub sku: Option<String>,
    pub category_id: Option<DbId>,
    pub store_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<DbId>,
    pub store_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
}

/// Stock reconciliation for one product: stored quantity against the sum of
/// committed ledger effects.
#[derive(Debug, Clone, Serialize)]
pub struct StockReconciliation {
    pub product_id: DbId,
    pub quantity: i64,
    pub ledger_total: i64,
    pub consistent: bool,
}
