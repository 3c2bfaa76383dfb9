//! HTTP-level integration tests for campuses, admin users, students, and
//! teachers, focused on campus scoping and role gates.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_campus, seed_user, token_for};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Campuses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_campus_and_duplicate_code_conflicts(pool: PgPool) {
    let admin = token_for(&seed_user(&pool, "root", "superadmin", None).await);
    let body = json!({ "name": "North Campus", "code": "NORTH" });

    let response = post_json_auth(common::build_test_app(pool.clone()), "/api/v1/campuses", &admin, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["is_active"], true);

    let response = post_json_auth(common::build_test_app(pool), "/api/v1/campuses", &admin, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

/// Non-privileged users see only their own campus.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campus_visibility(pool: PgPool) {
    let campus_a = seed_campus(&pool, "A").await;
    let campus_b = seed_campus(&pool, "B").await;
    let teacher = token_for(&seed_user(&pool, "teach", "teacher", Some(campus_a.id)).await);
    let admin = token_for(&seed_user(&pool, "root", "admin", None).await);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/campuses", &teacher).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["id"], campus_a.id);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/campuses/{}", campus_b.id),
        &teacher,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(common::build_test_app(pool), "/api/v1/campuses", &admin).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_teacher_cannot_create_campus(pool: PgPool) {
    let teacher = token_for(&seed_user(&pool, "teach", "teacher", None).await);
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/campuses",
        &teacher,
        json!({ "name": "Rogue", "code": "ROGUE" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Admin users
// ---------------------------------------------------------------------------

/// A campus-bound admin creates users on its own campus only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_user_management(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let admin_user = seed_user(&pool, "boss", "admin", Some(campus.id)).await;
    let admin = token_for(&admin_user);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users",
        &admin,
        json!({
            "username": "newclerk",
            "email": "newclerk@test.com",
            "password": "long-enough-pw",
            "role": "staff"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["campus_id"], campus.id);
    assert!(created["data"].get("password_hash").is_none());

    let id = created["data"]["id"].as_i64().unwrap();
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{id}"),
        &admin,
        json!({ "role": "teacher" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "teacher");

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{}", admin_user.id),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "cannot deactivate self");

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/users/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_user_validation(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let admin = token_for(&seed_user(&pool, "boss", "admin", Some(campus.id)).await);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users",
        &admin,
        json!({ "username": "x1x", "email": "not-an-email", "password": "long-enough-pw", "role": "staff" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users",
        &admin,
        json!({ "username": "short", "email": "s@test.com", "password": "short", "role": "staff" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/users",
        &admin,
        json!({ "username": "janitor", "email": "j@test.com", "password": "long-enough-pw", "role": "janitor" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Students and teachers
// ---------------------------------------------------------------------------

/// Students created on one campus are invisible from another.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_students_are_campus_scoped(pool: PgPool) {
    let campus_a = seed_campus(&pool, "A").await;
    let campus_b = seed_campus(&pool, "B").await;
    let admin_a = token_for(&seed_user(&pool, "admin_a", "admin", Some(campus_a.id)).await);
    let teacher_b = token_for(&seed_user(&pool, "teach_b", "teacher", Some(campus_b.id)).await);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/students",
        &admin_a,
        json!({ "admission_no": "A-001", "first_name": "Ada" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/students/{id}"),
        &teacher_b,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(common::build_test_app(pool), "/api/v1/students", &teacher_b).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);
}

/// Admission numbers are unique per campus.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_admission_no_conflicts(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let admin = token_for(&seed_user(&pool, "boss", "admin", Some(campus.id)).await);
    let body = json!({ "admission_no": "A-001", "first_name": "Ada" });

    let first = post_json_auth(common::build_test_app(pool.clone()), "/api/v1/students", &admin, body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = post_json_auth(common::build_test_app(pool), "/api/v1/students", &admin, body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_teacher_crud(pool: PgPool) {
    let campus = seed_campus(&pool, "A").await;
    let admin = token_for(&seed_user(&pool, "boss", "admin", Some(campus.id)).await);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/teachers",
        &admin,
        json!({ "employee_code": "T-9", "first_name": "Grace", "subject": "Maths" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/teachers/{id}"),
        &admin,
        json!({ "subject": "Physics" }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["subject"], "Physics");

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/teachers/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/teachers/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
