//! Purchase ledger row model and DTOs.

use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A purchase row from the `purchases` table. Adds stock once `Completed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Purchase {
    pub id: DbId,
    pub campus_id: DbId,
    pub product_id: DbId,
    pub supplier_id: Option<DbId>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub status: String,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a purchase. `status` defaults to `Pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePurchase {
    pub campus_id: Option<DbId>,
    pub product_id: DbId,
    pub supplier_id: Option<DbId>,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    pub status: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for editing a purchase. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePurchase {
    pub product_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    pub status: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(quantity: i64) -> CreatePurchase {
        CreatePurchase {
            campus_id: None,
            product_id: 1,
            supplier_id: None,
            quantity,
            unit_price: None,
            status: None,
            purchase_date: None,
            notes: None,
        }
    }

    #[test]
    fn quantity_is_bounded() {
        assert!(create(1).validate().is_ok());
        assert!(create(1_000_000_000).validate().is_ok());
        assert!(create(0).validate().is_err());
        assert!(create(i64::MAX).validate().is_err());
    }
}
