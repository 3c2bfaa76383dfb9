//! HTTP-level integration tests for the `/auth` endpoints.
//!
//! Tests cover login, token refresh with rotation, logout, the `me`
//! profile, and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, seed_campus, seed_user, TEST_PASSWORD};
use sqlx::PgPool;

async fn login(pool: &PgPool, login: &str, password: &str) -> axum::response::Response {
    let body = serde_json::json!({ "username": login, "password": password });
    post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await
}

/// Successful login returns tokens and the user's campus binding.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let campus = seed_campus(&pool, "NORTH").await;
    let user = seed_user(&pool, "clerk", "staff", Some(campus.id)).await;

    let response = login(&pool, "clerk", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "staff");
    assert_eq!(json["user"]["campus_id"], campus.id);
}

/// The email address is accepted in place of the username.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_email(pool: PgPool) {
    seed_user(&pool, "byemail", "admin", None).await;

    let body = serde_json::json!({ "email": "byemail@test.com", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    seed_user(&pool, "wrongpw", "admin", None).await;

    let response = login(&pool, "wrongpw", "incorrect_password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let response = login(&pool, "ghost", "whatever").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Five consecutive failures lock the account, even for the right password.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_lockout(pool: PgPool) {
    seed_user(&pool, "locked", "teacher", None).await;

    for _ in 0..5 {
        let response = login(&pool, "locked", "nope-nope-nope").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = login(&pool, "locked", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// `me` returns the caller's profile wrapped in a data envelope.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let campus = seed_campus(&pool, "MAIN").await;
    let user = seed_user(&pool, "whoami", "teacher", Some(campus.id)).await;
    let token = common::token_for(&user);

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "whoami");
    assert_eq!(json["data"]["campus_id"], campus.id);
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refresh rotates the token: the old one stops working.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    seed_user(&pool, "refresher", "admin", None).await;
    let json = body_json(login(&pool, "refresher", TEST_PASSWORD).await).await;
    let original = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": original });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), original);

    let reused = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every refresh token the user holds and purges dead rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    seed_user(&pool, "leaver", "admin", None).await;
    let json = body_json(login(&pool, "leaver", TEST_PASSWORD).await).await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        &access,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0, "logout purges revoked sessions");

    let body = serde_json::json!({ "refresh_token": refresh });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
