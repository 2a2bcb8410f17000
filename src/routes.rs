//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                 - Landing page (public)
//! - `GET  /user/{username}`  - Public profile (public)
//! - `/register`, `/login`    - Credential forms (public, strict rate limit)
//! - `/manage_links`, `/edit_link/*`, `/delete_link/*`, `/logout` - Cookie session required
//! - `GET  /health`           - Health check (JSON)
//! - `/static/*`              - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket ([`app_router`] only)
//! - **Authentication** - Cookie session on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::handlers::health_handler;
use crate::web::middleware::{rate_limit, session_auth, tracing};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the routes and middleware without rate limiting.
///
/// The limiter keys on the peer address, which only exists when served with
/// connect info; in-process test servers use this router directly.
pub fn router(state: AppState) -> Router {
    build(state, false)
}

/// Constructs the production router: [`router`] plus per-IP rate limits and
/// trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, true))
}

fn build(state: AppState, rate_limited: bool) -> Router {
    let mut protected = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), session_auth::layer),
    );
    let mut credentials = web::routes::credential_routes();
    let mut public = web::routes::public_routes();

    if rate_limited {
        protected = protected.layer(rate_limit::layer());
        credentials = credentials.layer(rate_limit::credentials_layer());
        public = public.layer(rate_limit::layer());
    }

    Router::new()
        .merge(public)
        .merge(credentials)
        .merge(protected)
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
