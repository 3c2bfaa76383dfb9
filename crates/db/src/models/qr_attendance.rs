//! QR attendance session and attendance record models.

use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `qr_attendance_sessions`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QrAttendanceSession {
    pub id: DbId,
    pub campus_id: DbId,
    pub token: String,
    pub attendance_type: String,
    pub expires_at: Timestamp,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for minting a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQrAttendanceSessionRequest {
    pub campus_id: Option<DbId>,
    pub attendance_type: String,
    /// Clamped to 1..=60 minutes; defaults to 3.
    pub expires_in_minutes: Option<i64>,
}

/// DTO for inserting a session once token and expiry are decided.
#[derive(Debug, Clone)]
pub struct CreateQrAttendanceSession {
    pub campus_id: DbId,
    pub token: String,
    pub attendance_type: String,
    pub expires_at: Timestamp,
    pub created_by: Option<DbId>,
}

/// A row from `qr_attendance`: one per person per day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QrAttendanceRecord {
    pub id: DbId,
    pub campus_id: DbId,
    pub session_id: Option<DbId>,
    pub person_type: String,
    pub person_id: DbId,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub check_in_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Everything needed to upsert today's attendance for one person.
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub campus_id: DbId,
    pub session_id: DbId,
    pub person_type: String,
    pub person_id: DbId,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub check_in_time: Timestamp,
}
