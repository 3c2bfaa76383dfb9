//! Issue ledger row model and DTOs (items handed out to staff or students).

use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An issue row from the `issues` table. Removes stock while `Issued`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Issue {
    pub id: DbId,
    pub campus_id: DbId,
    pub product_id: DbId,
    pub issued_to: String,
    pub quantity: i64,
    pub status: String,
    pub issue_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an issue. `status` defaults to `Issued`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIssue {
    pub campus_id: Option<DbId>,
    pub product_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub issued_to: String,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: i64,
    pub status: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for editing an issue. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateIssue {
    pub product_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub issued_to: Option<String>,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: Option<i64>,
    pub status: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
