//! QR attendance session rules.
//!
//! Staff mint a short-lived random token bound to a campus and an attendance
//! type. Students or teachers redeem it to mark themselves present for the
//! day. This module owns token generation, expiry clamping, and the checks a
//! redemption must pass before anything is written.

use chrono::Duration;
use rand::Rng;

use crate::error::CoreError;
use crate::roles::{ROLE_STUDENT, ROLE_TEACHER};
use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Number of random bytes behind a session token (hex-encoded to twice this).
pub const TOKEN_BYTES: usize = 16;

/// Session lifetime used when the request does not specify one.
pub const DEFAULT_EXPIRY_MINUTES: i64 = 3;

/// Shortest allowed session lifetime.
pub const MIN_EXPIRY_MINUTES: i64 = 1;

/// Longest allowed session lifetime.
pub const MAX_EXPIRY_MINUTES: i64 = 60;

pub const ATTENDANCE_TYPE_STUDENT: &str = "student";
pub const ATTENDANCE_TYPE_TEACHER: &str = "teacher";

pub const VALID_ATTENDANCE_TYPES: &[&str] = &[ATTENDANCE_TYPE_STUDENT, ATTENDANCE_TYPE_TEACHER];

pub const STATUS_PRESENT: &str = "Present";
pub const STATUS_LATE: &str = "Late";
pub const STATUS_ABSENT: &str = "Absent";

pub const VALID_ATTENDANCE_STATUSES: &[&str] = &[STATUS_PRESENT, STATUS_LATE, STATUS_ABSENT];

/* --------------------------------------------------------------------------
Errors
-------------------------------------------------------------------------- */

/// Reasons a QR token cannot be redeemed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrAttendanceError {
    #[error("Invalid or unknown attendance session")]
    InvalidSession,

    #[error("{0}")]
    Forbidden(String),

    #[error("Attendance session expired at {expires_at}")]
    Expired { expires_at: Timestamp },
}

/* --------------------------------------------------------------------------
Token and expiry
-------------------------------------------------------------------------- */

/// Generate a random lowercase hex session token.
pub fn generate_session_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Clamp a requested session lifetime to the allowed window.
pub fn clamp_expiry_minutes(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_EXPIRY_MINUTES)
        .clamp(MIN_EXPIRY_MINUTES, MAX_EXPIRY_MINUTES)
}

/// Compute the expiry instant for a session issued at `issued_at`.
pub fn session_expires_at(issued_at: Timestamp, requested_minutes: Option<i64>) -> Timestamp {
    issued_at + Duration::minutes(clamp_expiry_minutes(requested_minutes))
}

/* --------------------------------------------------------------------------
Redemption checks
-------------------------------------------------------------------------- */

/// Map a user role to the attendance type it redeems as.
pub fn attendance_type_for_role(role: &str) -> Option<&'static str> {
    match role {
        ROLE_STUDENT => Some(ATTENDANCE_TYPE_STUDENT),
        ROLE_TEACHER => Some(ATTENDANCE_TYPE_TEACHER),
        _ => None,
    }
}

/// Verify a session can be redeemed by a person on `person_campus` at `now`.
///
/// The campus check runs before the expiry check so a foreign campus never
/// learns whether the token is still live.
pub fn check_redeemable(
    session_campus: DbId,
    session_expires_at: Timestamp,
    person_campus: DbId,
    now: Timestamp,
) -> Result<(), QrAttendanceError> {
    if session_campus != person_campus {
        return Err(QrAttendanceError::Forbidden(
            "Attendance session belongs to a different campus".into(),
        ));
    }
    if now > session_expires_at {
        return Err(QrAttendanceError::Expired {
            expires_at: session_expires_at,
        });
    }
    Ok(())
}

/// Validate an attendance type string.
pub fn validate_attendance_type(value: &str) -> Result<(), CoreError> {
    if VALID_ATTENDANCE_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid attendance type '{value}'. Must be one of: {}",
            VALID_ATTENDANCE_TYPES.join(", ")
        )))
    }
}

/// Validate an attendance status string.
pub fn validate_attendance_status(value: &str) -> Result<(), CoreError> {
    if VALID_ATTENDANCE_STATUSES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid attendance status '{value}'. Must be one of: {}",
            VALID_ATTENDANCE_STATUSES.join(", ")
        )))
    }
}
