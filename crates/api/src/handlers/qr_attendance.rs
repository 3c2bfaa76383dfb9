//! Handlers for the `/qr-attendance` resource.
//!
//! Staff mint a short-lived token for their campus; students and teachers
//! redeem it to mark themselves for today.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::qr_attendance::{
    attendance_type_for_role, check_redeemable, generate_session_token, session_expires_at,
    validate_attendance_status, validate_attendance_type, QrAttendanceError,
    ATTENDANCE_TYPE_STUDENT, STATUS_PRESENT,
};
use campus_core::types::DbId;
use campus_db::models::qr_attendance::{
    AttendanceMark, CreateQrAttendanceSession, CreateQrAttendanceSessionRequest,
    QrAttendanceRecord, QrAttendanceSession,
};
use campus_db::repositories::{QrAttendanceRepo, StudentRepo, TeacherRepo};
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::campus::CampusScope;
use crate::middleware::rbac::ensure_staff;
use crate::query::DateParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /qr-attendance/redeem`.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub token: String,
    /// Defaults to `Present`.
    pub status: Option<String>,
}

/// POST /api/v1/qr-attendance/sessions
///
/// Mint a session token. Expiry defaults to 3 minutes, clamped to 1..=60.
pub async fn create_session(
    State(state): State<AppState>,
    scope: CampusScope,
    Json(input): Json<CreateQrAttendanceSessionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<QrAttendanceSession>>)> {
    ensure_staff(&scope.user)?;
    validate_attendance_type(&input.attendance_type)?;
    let created_by = scope.user.user_id;
    let campus_id = scope.with_body(input.campus_id).require()?;

    let session = QrAttendanceRepo::create_session(
        &state.pool,
        &CreateQrAttendanceSession {
            campus_id,
            token: generate_session_token(),
            attendance_type: input.attendance_type,
            expires_at: session_expires_at(Utc::now(), input.expires_in_minutes),
            created_by: Some(created_by),
        },
    )
    .await?;

    tracing::info!(
        session_id = session.id,
        campus_id,
        attendance_type = %session.attendance_type,
        expires_at = %session.expires_at,
        created_by,
        "QR attendance session issued"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/qr-attendance/sessions
///
/// Sessions of the resolved campus that are still redeemable.
pub async fn list_sessions(
    State(state): State<AppState>,
    scope: CampusScope,
) -> AppResult<Json<DataResponse<Vec<QrAttendanceSession>>>> {
    ensure_staff(&scope.user)?;
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let sessions = QrAttendanceRepo::list_active_sessions(&state.pool, campus_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// Resolve the caller's own student or teacher row as `(person_id, campus_id)`.
async fn resolve_person(
    state: &AppState,
    user: &AuthUser,
    person_type: &str,
) -> AppResult<(DbId, DbId)> {
    let person = if person_type == ATTENDANCE_TYPE_STUDENT {
        StudentRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .map(|s| (s.id, s.campus_id))
    } else {
        TeacherRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .map(|t| (t.id, t.campus_id))
    };
    person.ok_or_else(|| {
        QrAttendanceError::Forbidden(format!(
            "No {person_type} profile is linked to this account"
        ))
        .into()
    })
}

/// POST /api/v1/qr-attendance/redeem
///
/// Mark today's attendance for the caller. Redeeming again the same day
/// updates the existing record.
pub async fn redeem(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RedeemRequest>,
) -> AppResult<Json<DataResponse<QrAttendanceRecord>>> {
    let person_type = attendance_type_for_role(&user.role).ok_or_else(|| {
        QrAttendanceError::Forbidden("Only students and teachers can redeem attendance".into())
    })?;

    let status = input.status.as_deref().unwrap_or(STATUS_PRESENT);
    validate_attendance_status(status)?;

    let session = QrAttendanceRepo::find_session_by_token(&state.pool, input.token.trim())
        .await?
        .ok_or(QrAttendanceError::InvalidSession)?;

    let (person_id, person_campus) = resolve_person(&state, &user, person_type).await?;

    let now = Utc::now();
    check_redeemable(session.campus_id, session.expires_at, person_campus, now)?;

    if session.attendance_type != person_type {
        return Err(QrAttendanceError::Forbidden(format!(
            "This session is for {} attendance",
            session.attendance_type
        ))
        .into());
    }

    let record = QrAttendanceRepo::mark_attendance(
        &state.pool,
        &AttendanceMark {
            campus_id: session.campus_id,
            session_id: session.id,
            person_type: person_type.to_string(),
            person_id,
            attendance_date: now.date_naive(),
            status: status.to_string(),
            check_in_time: now,
        },
    )
    .await?;

    tracing::info!(
        session_id = session.id,
        person_type,
        person_id,
        campus_id = session.campus_id,
        status,
        "Attendance marked via QR"
    );
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/qr-attendance/records?date=YYYY-MM-DD
///
/// Attendance rows of the resolved campus for one day (default today, UTC).
pub async fn list_records(
    State(state): State<AppState>,
    scope: CampusScope,
    Query(params): Query<DateParams>,
) -> AppResult<Json<DataResponse<Vec<QrAttendanceRecord>>>> {
    ensure_staff(&scope.user)?;
    let Some(campus_id) = scope.campus_id() else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let records = QrAttendanceRepo::list_records(&state.pool, campus_id, date).await?;
    Ok(Json(DataResponse { data: records }))
}
