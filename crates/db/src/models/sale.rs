//! Sale ledger row model and DTOs.

use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A sale row from the `sales` table. Removes stock once `Paid`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sale {
    pub id: DbId,
    pub campus_id: DbId,
    pub product_id: DbId,
    pub customer_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub status: String,
    pub sale_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a sale. `status` defaults to `Pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSale {
    pub campus_id: Option<DbId>,
    pub product_id: DbId,
    pub customer_name: Option<String>,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    pub status: Option<String>,
    pub sale_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for editing a sale. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSale {
    pub product_id: Option<DbId>,
    pub customer_name: Option<String>,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    pub status: Option<String>,
    pub sale_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
