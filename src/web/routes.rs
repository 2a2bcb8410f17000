//! Browser route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    add_link_submit, delete_link_handler, edit_link_page, edit_link_submit, home_handler,
    login_page, login_submit, logout_handler, manage_links_page, profile_handler, register_page,
    register_submit,
};
use axum::{Router, routing::get};

/// Routes requiring a signed-in user.
///
/// Protected via [`crate::web::middleware::session_auth`]; handlers receive
/// the caller as `Extension<CurrentUser>`.
///
/// # Endpoints
///
/// - `GET  /logout`
/// - `GET  /manage_links`, `POST /manage_links`
/// - `GET  /edit_link/{link_id}`, `POST /edit_link/{link_id}`
/// - `GET  /delete_link/{link_id}`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", get(logout_handler))
        .route("/manage_links", get(manage_links_page).post(add_link_submit))
        .route(
            "/edit_link/{link_id}",
            get(edit_link_page).post(edit_link_submit),
        )
        .route("/delete_link/{link_id}", get(delete_link_handler))
}

/// Credential forms, kept apart so they can carry a stricter rate limit.
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register_submit))
        .route("/login", get(login_page).post(login_submit))
}

/// Public pages without authentication.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/user/{username}", get(profile_handler))
}
