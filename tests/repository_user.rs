mod common;

use bio_links::AppError;
use bio_links::domain::entities::NewUser;
use bio_links::domain::repositories::UserRepository;
use bio_links::infrastructure::persistence::SqliteUserRepository;
use std::sync::Arc;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));

    let created = repo.create(new_user("alice", "alice@x.com")).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.username, "alice");

    let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
    let by_email = repo.find_by_email("alice@x.com").await.unwrap().unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(by_name, created);
    assert_eq!(by_email, created);
    assert_eq!(by_id, created);
}

#[tokio::test]
async fn test_username_lookup_is_exact() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));
    repo.create(new_user("alice", "alice@x.com")).await.unwrap();

    assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    assert!(repo.find_by_username("ali").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));
    repo.create(new_user("alice", "alice@x.com")).await.unwrap();

    let err = repo
        .create(new_user("alice", "other@x.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.to_string(), "Username already taken");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));
    repo.create(new_user("alice", "alice@x.com")).await.unwrap();

    let err = repo
        .create(new_user("alice2", "alice@x.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.to_string(), "Email already registered");
}

#[tokio::test]
async fn test_list_count_delete() {
    let pool = common::test_pool().await;
    let repo = SqliteUserRepository::new(Arc::new(pool.clone()));

    let alice = repo.create(new_user("alice", "alice@x.com")).await.unwrap();
    repo.create(new_user("bob", "bob@x.com")).await.unwrap();
    common::create_test_link(&pool, alice.id, "Blog", "https://alice.dev").await;

    assert_eq!(repo.count().await.unwrap(), 2);
    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);

    assert!(repo.delete(alice.id).await.unwrap());
    assert!(!repo.delete(alice.id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 1);

    let remaining_links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining_links, 0);
}
