//! HTTP-level integration tests for the `/qr-attendance` endpoints.

mod common;

use axum::http::StatusCode;
use campus_core::types::DbId;
use campus_db::models::qr_attendance::CreateQrAttendanceSession;
use campus_db::models::student::CreateStudent;
use campus_db::models::teacher::CreateTeacher;
use campus_db::models::user::User;
use campus_db::repositories::{QrAttendanceRepo, StudentRepo, TeacherRepo};
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_json_auth, seed_campus, seed_user, token_for};
use serde_json::json;
use sqlx::PgPool;

/// Seed a student login plus its linked student profile.
async fn seed_student(pool: &PgPool, username: &str, campus_id: DbId) -> User {
    let user = seed_user(pool, username, "student", Some(campus_id)).await;
    let input = CreateStudent {
        campus_id: None,
        user_id: Some(user.id),
        admission_no: format!("ADM-{username}"),
        first_name: username.to_string(),
        last_name: None,
        class_name: None,
        section: None,
        roll_no: None,
        guardian_name: None,
        phone: None,
    };
    StudentRepo::create(pool, campus_id, &input)
        .await
        .expect("student creation should succeed");
    user
}

/// Seed a teacher login plus its linked teacher profile.
async fn seed_teacher(pool: &PgPool, username: &str, campus_id: DbId) -> User {
    let user = seed_user(pool, username, "teacher", Some(campus_id)).await;
    let input = CreateTeacher {
        campus_id: None,
        user_id: Some(user.id),
        employee_code: format!("EMP-{username}"),
        first_name: username.to_string(),
        last_name: None,
        subject: None,
        phone: None,
        email: None,
    };
    TeacherRepo::create(pool, campus_id, &input)
        .await
        .expect("teacher creation should succeed");
    user
}

/// Issue a session through the API and return its token.
async fn issue_session(pool: &PgPool, token: &str, attendance_type: &str) -> String {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/qr-attendance/sessions",
        token,
        json!({ "attendance_type": attendance_type, "expires_in_minutes": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn redeem(pool: &PgPool, token: &str, body: serde_json::Value) -> axum::response::Response {
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/qr-attendance/redeem",
        token,
        body,
    )
    .await
}

// ---------------------------------------------------------------------------
// Issuing
// ---------------------------------------------------------------------------

/// Issued sessions carry a 32-hex token and a clamped expiry.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_teacher_issues_session(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let teacher = token_for(&seed_teacher(&pool, "mrs_k", campus.id).await);

    let before = Utc::now();
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/qr-attendance/sessions",
        &teacher,
        json!({ "attendance_type": "student", "expires_in_minutes": 500 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(json["data"]["campus_id"], campus.id);

    let expires_at: chrono::DateTime<Utc> =
        serde_json::from_value(json["data"]["expires_at"].clone()).unwrap();
    assert!(expires_at <= before + Duration::minutes(61));
    assert!(expires_at >= before + Duration::minutes(59));

    let response = get_auth(common::build_test_app(pool), "/api/v1/qr-attendance/sessions", &teacher).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_cannot_issue_session(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let student = token_for(&seed_student(&pool, "kid", campus.id).await);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/qr-attendance/sessions",
        &student,
        json!({ "attendance_type": "student" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_attendance_type_rejected(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let teacher = token_for(&seed_teacher(&pool, "mrs_k", campus.id).await);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/qr-attendance/sessions",
        &teacher,
        json!({ "attendance_type": "parent" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Redeeming
// ---------------------------------------------------------------------------

/// Redeeming twice on the same day updates the single record.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_redeems_once_per_day(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let teacher = token_for(&seed_teacher(&pool, "mrs_k", campus.id).await);
    let student = token_for(&seed_student(&pool, "kid", campus.id).await);
    let session = issue_session(&pool, &teacher, "student").await;

    let response = redeem(&pool, &student, json!({ "token": session })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["data"]["status"], "Present");
    assert_eq!(first["data"]["person_type"], "student");

    let response = redeem(&pool, &student, json!({ "token": session, "status": "Late" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["data"]["id"], first["data"]["id"]);
    assert_eq!(second["data"]["status"], "Late");

    let response = get_auth(common::build_test_app(pool), "/api/v1/qr-attendance/records", &teacher).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

/// Expired sessions answer 410 and write nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_is_gone(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let student_user = seed_student(&pool, "kid", campus.id).await;
    let student = token_for(&student_user);

    QrAttendanceRepo::create_session(
        &pool,
        &CreateQrAttendanceSession {
            campus_id: campus.id,
            token: "0123456789abcdef0123456789abcdef".to_string(),
            attendance_type: "student".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
            created_by: None,
        },
    )
    .await
    .unwrap();

    let response = redeem(&pool, &student, json!({ "token": "0123456789abcdef0123456789abcdef" })).await;
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(body_json(response).await["code"], "SESSION_EXPIRED");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM qr_attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// A session from another campus is forbidden.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_campus_session_forbidden(pool: PgPool) {
    let campus_a = seed_campus(&pool, "A").await;
    let campus_b = seed_campus(&pool, "B").await;
    let teacher_b = token_for(&seed_teacher(&pool, "mr_b", campus_b.id).await);
    let student_a = token_for(&seed_student(&pool, "kid", campus_a.id).await);
    let session = issue_session(&pool, &teacher_b, "student").await;

    let response = redeem(&pool, &student_a, json!({ "token": session })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_token_is_invalid(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let student = token_for(&seed_student(&pool, "kid", campus.id).await);

    let response = redeem(&pool, &student, json!({ "token": "deadbeef" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_SESSION");
}

/// A teacher session cannot be redeemed by a student.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attendance_type_must_match_role(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let teacher = token_for(&seed_teacher(&pool, "mrs_k", campus.id).await);
    let student = token_for(&seed_student(&pool, "kid", campus.id).await);
    let session = issue_session(&pool, &teacher, "teacher").await;

    let response = redeem(&pool, &student, json!({ "token": session })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = redeem(&pool, &teacher, json!({ "token": session })).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Admins have no attendance profile and cannot redeem.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_cannot_redeem(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let teacher = token_for(&seed_teacher(&pool, "mrs_k", campus.id).await);
    let admin = token_for(&seed_user(&pool, "boss", "admin", Some(campus.id)).await);
    let session = issue_session(&pool, &teacher, "student").await;

    let response = redeem(&pool, &admin, json!({ "token": session })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
