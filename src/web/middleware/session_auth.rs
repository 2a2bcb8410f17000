//! Cookie session authentication for browser routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::domain::entities::CurrentUser;
use crate::state::AppState;
use crate::web::cookies::{SESSION_COOKIE, read_cookie};
use crate::web::flash::{Flash, flash_redirect};

/// Gatekeeper for protected routes.
///
/// Resolves the `session` cookie through
/// [`crate::application::services::AccountService::authenticate`] and inserts
/// the resulting [`CurrentUser`] into request extensions, where handlers pick
/// it up with `Extension<CurrentUser>`.
///
/// A missing, unknown or expired session redirects to `/login` with an info
/// flash instead of returning 401.
///
/// ```rust,ignore
/// let protected = web::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), session_auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = read_cookie(req.headers(), SESSION_COOKIE) else {
        return login_redirect(st.secure_cookies);
    };

    match st.account_service.authenticate(&token).await {
        Ok(current) => {
            req.extensions_mut().insert(current);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Session rejected");
            login_redirect(st.secure_cookies)
        }
    }
}

fn login_redirect(secure: bool) -> Response {
    flash_redirect(
        "/login",
        Flash::info("Please log in to access this page."),
        secure,
    )
}

/// The signed-in user on public pages, if any. Used for navigation only.
#[derive(Debug, Clone, Default)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl OptionalUser {
    /// Percent-encoded `/user/{username}` for the nav link.
    pub fn profile_path(&self) -> Option<String> {
        self.0.as_ref().map(|c| c.user.profile_path())
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(Self(Some(current.clone())));
        }

        let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(Self(None));
        };

        Ok(Self(state.account_service.authenticate(&token).await.ok()))
    }
}
