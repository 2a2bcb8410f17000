//! Public profile page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{Flash, IncomingFlash};
use crate::web::middleware::session_auth::OptionalUser;

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    flash: Option<Flash>,
    nav_profile: Option<String>,
    username: String,
    links: Vec<Link>,
}

/// Renders a user's public list of links.
///
/// # Endpoint
///
/// `GET /user/{username}`
///
/// No authentication. Unknown usernames get the 404 error page.
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: OptionalUser,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    let profile = state.profile_service.get_profile(&username).await?;

    let page = ProfileTemplate {
        flash: flash.message().cloned(),
        nav_profile: user.profile_path(),
        username: profile.username,
        links: profile.links,
    };

    Ok(flash.render(page))
}
