//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::Response;

use crate::web::flash::{Flash, IncomingFlash};
use crate::web::middleware::session_auth::OptionalUser;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    flash: Option<Flash>,
    nav_profile: Option<String>,
}

/// `GET /`
pub async fn home_handler(user: OptionalUser, flash: IncomingFlash) -> Response {
    let page = HomeTemplate {
        flash: flash.message().cloned(),
        nav_profile: user.profile_path(),
    };
    flash.render(page)
}
