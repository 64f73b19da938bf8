//! Integration tests for `SessionRepo` against a real database.

use chrono::{Duration, Utc};
use lms_db::models::session::CreateSession;
use lms_db::models::user::CreateUser;
use lms_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

async fn session_for_new_user(pool: &PgPool, hash: &str, expires_in: Duration) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Ana Lima".to_string(),
            email: format!("{hash}@example.com"),
            password_hash: None,
            role: "student".to_string(),
            level: None,
            status: None,
            phone: None,
            avatar_url: None,
            bio: None,
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + expires_in,
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap();
    user.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn redeem_revokes_once(pool: PgPool) {
    let user_id = session_for_new_user(&pool, "live", Duration::days(7)).await;

    let session = SessionRepo::redeem(&pool, "live").await.unwrap().unwrap();
    assert_eq!(session.user_id, user_id);
    assert!(session.is_revoked);

    assert!(SessionRepo::redeem(&pool, "live").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_and_unknown_tokens_are_not_redeemed(pool: PgPool) {
    session_for_new_user(&pool, "stale", Duration::minutes(-5)).await;

    assert!(SessionRepo::redeem(&pool, "stale").await.unwrap().is_none());
    assert!(SessionRepo::redeem(&pool, "missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoke_all_counts_active_sessions(pool: PgPool) {
    let user_id = session_for_new_user(&pool, "one", Duration::days(1)).await;
    SessionRepo::redeem(&pool, "one").await.unwrap();

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user_id).await.unwrap(), 0);
}
