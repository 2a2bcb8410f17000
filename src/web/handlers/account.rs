//! Registration, login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::dto::{LoginInput, RegisterInput};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies::{SESSION_COOKIE, removal_cookie, session_cookie, to_header_value};
use crate::web::flash::{Flash, IncomingFlash, flash_redirect};
use crate::web::middleware::session_auth::OptionalUser;

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {
    flash: Option<Flash>,
    nav_profile: Option<String>,
    errors: Vec<String>,
    username: String,
    email: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    flash: Option<Flash>,
    nav_profile: Option<String>,
    errors: Vec<String>,
    email: String,
}

/// `GET /register`
pub async fn register_page(user: OptionalUser, flash: IncomingFlash) -> Response {
    let page = RegisterTemplate {
        flash: flash.message().cloned(),
        nav_profile: user.profile_path(),
        errors: Vec::new(),
        username: String::new(),
        email: String::new(),
    };
    flash.render(page)
}

/// Creates an account from the registration form.
///
/// # Endpoint
///
/// `POST /register`
///
/// On success redirects to `/login` with a success flash. Invalid input and
/// taken usernames or emails re-render the form (400 / 409) keeping the
/// entered username and email; the password fields are never echoed.
pub async fn register_submit(
    State(state): State<AppState>,
    Form(input): Form<RegisterInput>,
) -> Result<Response, AppError> {
    let username = input.username.clone();
    let email = input.email.clone();

    match state.account_service.register(input).await {
        Ok(_) => Ok(flash_redirect(
            "/login",
            Flash::success("Account created! Please login."),
            state.secure_cookies,
        )),
        Err(e @ (AppError::Validation { .. } | AppError::Conflict { .. })) => {
            let page = RegisterTemplate {
                flash: None,
                nav_profile: None,
                errors: e.user_messages(),
                username,
                email,
            };
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// `GET /login`
pub async fn login_page(user: OptionalUser, flash: IncomingFlash) -> Response {
    let page = LoginTemplate {
        flash: flash.message().cloned(),
        nav_profile: user.profile_path(),
        errors: Vec::new(),
        email: String::new(),
    };
    flash.render(page)
}

/// Verifies credentials and starts a session.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Cookie
///
/// ```text
/// Set-Cookie: session=<token>; HttpOnly; SameSite=Lax; Path=/[; Secure][; Max-Age=<remember-me>]
/// ```
///
/// Without "remember me" the cookie has no `Max-Age` and ends with the browser
/// session. On success redirects to the user's public profile.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(input): Form<LoginInput>,
) -> Result<Response, AppError> {
    let email = input.email.clone();

    match state.account_service.login(input).await {
        Ok(issued) => {
            let max_age = issued.session.persistent.then(|| {
                cookie::time::Duration::seconds(
                    state.account_service.settings().remember_ttl.num_seconds(),
                )
            });
            let cookie = session_cookie(&issued.token, max_age, state.secure_cookies);

            Ok((
                [(SET_COOKIE, to_header_value(&cookie))],
                Redirect::to(&issued.user.profile_path()),
            )
                .into_response())
        }
        Err(e @ (AppError::Validation { .. } | AppError::Authentication { .. })) => {
            let page = LoginTemplate {
                flash: None,
                nav_profile: None,
                errors: e.user_messages(),
                email,
            };
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Ends the current session and clears the cookie.
///
/// # Endpoint
///
/// `GET /logout` (session required)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, AppError> {
    state.account_service.logout(&current).await?;

    let mut response = flash_redirect("/", Flash::info("Logged out"), state.secure_cookies);
    response
        .headers_mut()
        .append(SET_COOKIE, to_header_value(&removal_cookie(SESSION_COOKIE)));

    Ok(response)
}
