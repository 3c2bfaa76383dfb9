//! Campus (tenant) model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A campus row from the `campuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campus {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new campus.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCampus {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    pub address: Option<String>,
}

/// DTO for updating an existing campus. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCampus {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}
