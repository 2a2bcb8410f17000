mod common;

use bio_links::domain::entities::NewSession;
use bio_links::domain::repositories::SessionRepository;
use bio_links::infrastructure::persistence::SqliteSessionRepository;
use chrono::{Duration, Utc};
use std::sync::Arc;

fn new_session(user_id: i64, token_hash: &str, expires_in: Duration) -> NewSession {
    NewSession {
        token_hash: token_hash.to_string(),
        user_id,
        persistent: false,
        expires_at: Utc::now() + expires_in,
    }
}

#[tokio::test]
async fn test_create_and_find_session() {
    let pool = common::test_pool().await;
    let alice = common::create_test_user(&pool, "alice").await;
    let repo = SqliteSessionRepository::new(Arc::new(pool));

    let session = repo
        .create(NewSession {
            persistent: true,
            ..new_session(alice, "hash-1", Duration::days(365))
        })
        .await
        .unwrap();

    assert!(session.persistent);
    assert_eq!(session.user_id, alice);

    let found = repo.find_by_token_hash("hash-1").await.unwrap().unwrap();
    assert_eq!(found.id, session.id);
    assert!(found.persistent);

    assert!(repo.find_by_token_hash("hash-2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_session() {
    let pool = common::test_pool().await;
    let alice = common::create_test_user(&pool, "alice").await;
    let repo = SqliteSessionRepository::new(Arc::new(pool));

    let session = repo
        .create(new_session(alice, "hash-1", Duration::hours(1)))
        .await
        .unwrap();

    assert!(repo.delete(session.id).await.unwrap());
    assert!(repo.find_by_token_hash("hash-1").await.unwrap().is_none());
    assert!(!repo.delete(session.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_expired_and_count_active() {
    let pool = common::test_pool().await;
    let alice = common::create_test_user(&pool, "alice").await;
    let repo = SqliteSessionRepository::new(Arc::new(pool));

    repo.create(new_session(alice, "live", Duration::hours(1)))
        .await
        .unwrap();
    repo.create(new_session(alice, "stale-1", Duration::hours(-1)))
        .await
        .unwrap();
    repo.create(new_session(alice, "stale-2", Duration::days(-3)))
        .await
        .unwrap();

    assert_eq!(repo.count_active(Utc::now()).await.unwrap(), 1);

    let removed = repo.delete_expired(Utc::now()).await.unwrap();

    assert_eq!(removed, 2);
    assert!(repo.find_by_token_hash("live").await.unwrap().is_some());
    assert!(repo.find_by_token_hash("stale-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sessions_cascade_with_user() {
    let pool = common::test_pool().await;
    let alice = common::create_test_user(&pool, "alice").await;
    let repo = SqliteSessionRepository::new(Arc::new(pool.clone()));

    repo.create(new_session(alice, "hash-1", Duration::hours(1)))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(alice)
        .execute(&pool)
        .await
        .unwrap();

    assert!(repo.find_by_token_hash("hash-1").await.unwrap().is_none());
}
