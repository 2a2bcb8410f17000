mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_register_page_renders() {
    let (server, _pool) = common::make_server().await;

    let response = server.get("/register").await;

    response.assert_status_ok();
    assert!(response.text().contains("confirm_password"));
}

#[tokio::test]
async fn test_register_redirects_to_login_with_flash() {
    let (server, pool) = common::make_server().await;

    let response = common::register(&server, "alice", "alice@x.com", "secret1").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
    assert!(common::set_cookie(&response, "flash").is_some());
    assert!(common::set_cookie(&response, "session").is_none());

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
        .bind("alice")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "secret1");
    assert!(stored.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let (server, _pool) = common::make_server().await;

    let response = common::register(&server, "alice", "alice@x.com", "secret1").await;
    let flash = common::cookie_value(&response, "flash").unwrap();

    let page = server
        .get("/login")
        .add_header("Cookie", format!("flash={flash}"))
        .await;

    page.assert_status_ok();
    assert!(page.text().contains("Account created! Please login."));
    let cleared = common::set_cookie(&page, "flash").unwrap();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (server, _pool) = common::make_server().await;
    common::register(&server, "alice", "alice@x.com", "secret1").await;

    let response = common::register(&server, "alice", "other@x.com", "secret1").await;

    response.assert_status(StatusCode::CONFLICT);
    assert!(response.text().contains("Username already taken"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (server, _pool) = common::make_server().await;
    common::register(&server, "alice", "alice@x.com", "secret1").await;

    let response = common::register(&server, "alice2", "alice@x.com", "secret1").await;

    response.assert_status(StatusCode::CONFLICT);
    assert!(response.text().contains("Email already registered"));
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (server, pool) = common::make_server().await;

    let response = server
        .post("/register")
        .form(&[
            ("username", "al"),
            ("email", "not-an-email"),
            ("password", "123"),
            ("confirm_password", "456"),
        ])
        .await;

    response.assert_status_bad_request();
    let body = response.text();
    assert!(body.contains("Username must be between 3 and 80 characters"));
    assert!(body.contains("Invalid email address"));
    assert!(body.contains("Password must be at least 6 characters"));
    assert!(body.contains("Passwords must match"));

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 0);
}

#[tokio::test]
async fn test_login_redirects_to_profile() {
    let (server, _pool) = common::make_server().await;
    common::register(&server, "alice", "alice@x.com", "secret1").await;

    let response = common::login(&server, "alice@x.com", "secret1").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/user/alice");

    let cookie = common::set_cookie(&response, "session").unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Max-Age"));
}

#[tokio::test]
async fn test_login_remember_me_sets_max_age() {
    let (server, _pool) = common::make_server().await;
    common::register(&server, "alice", "alice@x.com", "secret1").await;

    let response = server
        .post("/login")
        .form(&[
            ("email", "alice@x.com"),
            ("password", "secret1"),
            ("remember", "on"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let cookie = common::set_cookie(&response, "session").unwrap();
    assert!(cookie.contains("Max-Age=31536000"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _pool) = common::make_server().await;
    common::register(&server, "alice", "alice@x.com", "secret1").await;

    let response = common::login(&server, "alice@x.com", "wrong-pass").await;

    response.assert_status_unauthorized();
    assert!(response.text().contains("Wrong email or password"));
    assert!(common::set_cookie(&response, "session").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_same_message() {
    let (server, _pool) = common::make_server().await;

    let response = common::login(&server, "nobody@x.com", "secret1").await;

    response.assert_status_unauthorized();
    assert!(response.text().contains("Wrong email or password"));
}

#[tokio::test]
async fn test_failed_login_keeps_manage_links_locked() {
    let (server, _pool) = common::make_server().await;
    common::register(&server, "alice", "alice@x.com", "secret1").await;
    common::login(&server, "alice@x.com", "wrong-pass").await;

    let response = server.get("/manage_links").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let (server, pool) = common::make_server().await;
    let cookie = common::signed_in(&server, "alice").await;

    let response = server.get("/logout").add_header("Cookie", cookie.clone()).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/");
    assert!(
        common::set_cookie(&response, "session")
            .unwrap()
            .contains("Max-Age=0")
    );

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sessions, 0);

    // The old token no longer works even if the browser kept it.
    let replay = server.get("/manage_links").add_header("Cookie", cookie).await;
    assert_eq!(common::location(&replay), "/login");
}

#[tokio::test]
async fn test_logout_requires_session() {
    let (server, _pool) = common::make_server().await;

    let response = server.get("/logout").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_removed() {
    let (server, pool) = common::make_server().await;
    let cookie = common::signed_in(&server, "alice").await;

    sqlx::query("UPDATE sessions SET expires_at = ?")
        .bind(chrono::Utc::now() - chrono::Duration::minutes(1))
        .execute(&pool)
        .await
        .unwrap();

    let response = server.get("/manage_links").add_header("Cookie", cookie).await;

    assert_eq!(common::location(&response), "/login");

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sessions, 0);
}
