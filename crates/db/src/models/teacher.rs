//! Teacher model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A teacher row from the `teachers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub campus_id: DbId,
    pub user_id: Option<DbId>,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new teacher.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeacher {
    pub campus_id: Option<DbId>,
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 50))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// DTO for updating an existing teacher. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeacher {
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 50))]
    pub employee_code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}
