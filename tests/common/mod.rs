#![allow(dead_code)]

use axum::http::header::{LOCATION, SET_COOKIE};
use axum_test::{TestResponse, TestServer};
use bio_links::application::services::SessionSettings;
use bio_links::infrastructure::persistence::pool;
use bio_links::routes::router;
use bio_links::state::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = pool::connect_in_memory().await.unwrap();
    pool::migrate(&pool).await.unwrap();
    pool
}

pub fn test_settings() -> SessionSettings {
    SessionSettings {
        signing_secret: TEST_SECRET.to_string(),
        ttl: chrono::Duration::hours(24),
        remember_ttl: chrono::Duration::days(365),
    }
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool), test_settings(), false)
}

pub async fn make_server() -> (TestServer, SqlitePool) {
    let pool = test_pool().await;
    let server = TestServer::new(router(create_test_state(pool.clone()))).unwrap();
    (server, pool)
}

/// Inserts a user directly; the password hash is a placeholder that never verifies.
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, 'x', ?) RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(pool: &SqlitePool, user_id: i64, name: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (name, url, user_id, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(url)
    .bind(user_id)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn link_row(pool: &SqlitePool, link_id: i64) -> Option<(String, String)> {
    sqlx::query_as("SELECT name, url FROM links WHERE id = ?")
        .bind(link_id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

/// Value and attributes of the `Set-Cookie` header for `name`, if present.
pub fn set_cookie(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(str::to_string)
}

/// Just the value part of a `Set-Cookie` header for `name`.
pub fn cookie_value(response: &TestResponse, name: &str) -> Option<String> {
    set_cookie(response, name).and_then(|header| {
        header
            .split(';')
            .next()
            .and_then(|pair| pair.split_once('='))
            .map(|(_, value)| value.to_string())
    })
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn register(server: &TestServer, username: &str, email: &str, password: &str) -> TestResponse {
    server
        .post("/register")
        .form(&[
            ("username", username),
            ("email", email),
            ("password", password),
            ("confirm_password", password),
        ])
        .await
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/login")
        .form(&[("email", email), ("password", password)])
        .await
}

/// Registers and logs in; returns a ready-to-send `Cookie` header value.
pub async fn signed_in(server: &TestServer, username: &str) -> String {
    let email = format!("{username}@example.com");
    register(server, username, &email, "secret1").await;
    let response = login(server, &email, "secret1").await;
    let token = cookie_value(&response, "session").expect("login sets a session cookie");
    format!("session={token}")
}
