//! Integration tests for refresh-token session storage.

use campus_db::models::session::CreateSession;
use campus_db::models::user::CreateUser;
use campus_db::repositories::{SessionRepo, UserRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: "sessions".to_string(),
            email: "sessions@test.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: "admin".to_string(),
            campus_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_session(pool: &PgPool, user_id: i64, hash: &str, expires_in: Duration) -> i64 {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + expires_in,
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cleanup_removes_only_dead_sessions(pool: PgPool) {
    let user = seed_user(&pool).await;
    seed_session(&pool, user, "live", Duration::days(7)).await;
    seed_session(&pool, user, "expired", Duration::minutes(-1)).await;
    let rotated = seed_session(&pool, user, "rotated", Duration::days(7)).await;
    assert!(SessionRepo::revoke(&pool, rotated).await.unwrap());

    let deleted = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(deleted, 2);

    let remaining: Vec<(String,)> = sqlx::query_as("SELECT refresh_token_hash FROM user_sessions")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, vec![("live".to_string(),)]);
    assert!(SessionRepo::find_active_by_hash(&pool, "live").await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoked_session_cannot_be_revoked_twice(pool: PgPool) {
    let user = seed_user(&pool).await;
    let id = seed_session(&pool, user, "once", Duration::days(1)).await;

    assert!(SessionRepo::revoke(&pool, id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, id).await.unwrap());
    assert!(SessionRepo::find_active_by_hash(&pool, "once").await.unwrap().is_none());
}
