//! Student model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A student row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub campus_id: DbId,
    /// Login account linked to this student, used for QR self check-in.
    pub user_id: Option<DbId>,
    pub admission_no: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub guardian_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    pub campus_id: Option<DbId>,
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 50))]
    pub admission_no: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    pub last_name: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub guardian_name: Option<String>,
    pub phone: Option<String>,
}

/// DTO for updating an existing student. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudent {
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 50))]
    pub admission_no: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub guardian_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}
