//! Repository for QR attendance sessions and the daily attendance rows they
//! produce.

use campus_core::qr_attendance::ATTENDANCE_TYPE_STUDENT;
use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::qr_attendance::{
    AttendanceMark, CreateQrAttendanceSession, QrAttendanceRecord, QrAttendanceSession,
};

/// Column list for `qr_attendance_sessions`.
const SESSION_COLUMNS: &str =
    "id, campus_id, token, attendance_type, expires_at, created_by, created_at, updated_at";

/// Column list for `qr_attendance`.
const RECORD_COLUMNS: &str = "id, campus_id, session_id, person_type, person_id, \
    attendance_date, status, check_in_time, created_at, updated_at";

/// Provides session issuance, token lookup, and attendance upserts.
pub struct QrAttendanceRepo;

impl QrAttendanceRepo {
    /// Insert a freshly minted session.
    pub async fn create_session(
        pool: &PgPool,
        input: &CreateQrAttendanceSession,
    ) -> Result<QrAttendanceSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO qr_attendance_sessions
                (campus_id, token, attendance_type, expires_at, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, QrAttendanceSession>(&query)
            .bind(input.campus_id)
            .bind(&input.token)
            .bind(&input.attendance_type)
            .bind(input.expires_at)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Look up a session by its token, regardless of campus or expiry.
    pub async fn find_session_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<QrAttendanceSession>, sqlx::Error> {
        let query = format!("SELECT {SESSION_COLUMNS} FROM qr_attendance_sessions WHERE token = $1");
        sqlx::query_as::<_, QrAttendanceSession>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List sessions on a campus that have not yet expired at `now`.
    pub async fn list_active_sessions(
        pool: &PgPool,
        campus_id: DbId,
        now: Timestamp,
    ) -> Result<Vec<QrAttendanceSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM qr_attendance_sessions
             WHERE campus_id = $1 AND expires_at >= $2
             ORDER BY expires_at DESC"
        );
        sqlx::query_as::<_, QrAttendanceSession>(&query)
            .bind(campus_id)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Upsert today's attendance for one person and mirror it into the
    /// per-role attendance table, in one transaction.
    ///
    /// Redeeming twice on the same day keeps a single row; the later scan
    /// overwrites status, check-in time, and session.
    pub async fn mark_attendance(
        pool: &PgPool,
        mark: &AttendanceMark,
    ) -> Result<QrAttendanceRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO qr_attendance
                (campus_id, session_id, person_type, person_id, attendance_date,
                 status, check_in_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (person_type, person_id, attendance_date) DO UPDATE SET
                status = EXCLUDED.status,
                check_in_time = EXCLUDED.check_in_time,
                session_id = EXCLUDED.session_id
             RETURNING {RECORD_COLUMNS}"
        );
        let record = sqlx::query_as::<_, QrAttendanceRecord>(&query)
            .bind(mark.campus_id)
            .bind(mark.session_id)
            .bind(&mark.person_type)
            .bind(mark.person_id)
            .bind(mark.attendance_date)
            .bind(&mark.status)
            .bind(mark.check_in_time)
            .fetch_one(&mut *tx)
            .await?;

        let mirror = if mark.person_type == ATTENDANCE_TYPE_STUDENT {
            "INSERT INTO student_attendance
                (campus_id, student_id, attendance_date, status, check_in_time)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (student_id, attendance_date) DO UPDATE SET
                status = EXCLUDED.status,
                check_in_time = EXCLUDED.check_in_time"
        } else {
            "INSERT INTO teacher_attendance
                (campus_id, teacher_id, attendance_date, status, check_in_time)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (teacher_id, attendance_date) DO UPDATE SET
                status = EXCLUDED.status,
                check_in_time = EXCLUDED.check_in_time"
        };
        sqlx::query(mirror)
            .bind(mark.campus_id)
            .bind(mark.person_id)
            .bind(mark.attendance_date)
            .bind(&mark.status)
            .bind(mark.check_in_time)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// List attendance rows for a campus on one day.
    pub async fn list_records(
        pool: &PgPool,
        campus_id: DbId,
        attendance_date: NaiveDate,
    ) -> Result<Vec<QrAttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM qr_attendance
             WHERE campus_id = $1 AND attendance_date = $2
             ORDER BY check_in_time ASC, id ASC"
        );
        sqlx::query_as::<_, QrAttendanceRecord>(&query)
            .bind(campus_id)
            .bind(attendance_date)
            .fetch_all(pool)
            .await
    }

    /// Count attendance rows for one person on one day (0 or 1).
    pub async fn count_for_person(
        pool: &PgPool,
        person_type: &str,
        person_id: DbId,
        attendance_date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM qr_attendance
             WHERE person_type = $1 AND person_id = $2 AND attendance_date = $3",
        )
        .bind(person_type)
        .bind(person_id)
        .bind(attendance_date)
        .fetch_one(pool)
        .await
    }
}
