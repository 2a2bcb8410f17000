//! Link management handlers. All of them run behind the session middleware.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::application::dto::LinkInput;
use crate::domain::entities::{CurrentUser, Link};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{Flash, IncomingFlash, flash_redirect};

const MANAGE_LINKS: &str = "/manage_links";

/// Shared by the list page and the edit page.
///
/// In edit mode `links` holds only the edited link and the form posts to
/// `/edit_link/{id}`.
#[derive(Template, WebTemplate)]
#[template(path = "manage_links.html")]
struct ManageLinksTemplate {
    flash: Option<Flash>,
    nav_profile: Option<String>,
    profile_path: String,
    links: Vec<Link>,
    edit_mode: bool,
    form_action: String,
    form_name: String,
    form_url: String,
    errors: Vec<String>,
}

impl ManageLinksTemplate {
    fn listing(current: &CurrentUser, links: Vec<Link>) -> Self {
        Self {
            flash: None,
            nav_profile: Some(current.user.profile_path()),
            profile_path: current.user.profile_path(),
            links,
            edit_mode: false,
            form_action: MANAGE_LINKS.to_string(),
            form_name: String::new(),
            form_url: String::new(),
            errors: Vec::new(),
        }
    }

    fn editing(current: &CurrentUser, link: Link) -> Self {
        Self {
            edit_mode: true,
            form_action: format!("/edit_link/{}", link.id),
            form_name: link.name.clone(),
            form_url: link.url.clone(),
            ..Self::listing(current, vec![link])
        }
    }
}

/// Turns a refused ownership check into the flash + redirect the pages use.
fn unauthorized_redirect(state: &AppState) -> Response {
    flash_redirect(MANAGE_LINKS, Flash::danger("Unauthorized"), state.secure_cookies)
}

/// Lists the caller's links with an "add link" form.
///
/// # Endpoint
///
/// `GET /manage_links`
pub async fn manage_links_page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    let links = state.link_service.list_links(current.id()).await?;

    let mut page = ManageLinksTemplate::listing(&current, links);
    page.flash = flash.message().cloned();

    Ok(flash.render(page))
}

/// Adds a link to the caller's profile.
///
/// # Endpoint
///
/// `POST /manage_links` (form fields `name`, `url`)
///
/// Redirects back to the list with "Link added!". Invalid input re-renders
/// the page with messages and the entered values (400).
pub async fn add_link_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Form(input): Form<LinkInput>,
) -> Result<Response, AppError> {
    let (name, url) = (input.name.clone(), input.url.clone());

    match state.link_service.add_link(current.id(), input).await {
        Ok(_) => Ok(flash_redirect(
            MANAGE_LINKS,
            Flash::success("Link added!"),
            state.secure_cookies,
        )),
        Err(e @ AppError::Validation { .. }) => {
            let links = state.link_service.list_links(current.id()).await?;
            let page = ManageLinksTemplate {
                form_name: name,
                form_url: url,
                errors: e.user_messages(),
                ..ManageLinksTemplate::listing(&current, links)
            };
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Shows the edit form pre-filled with the link's current values.
///
/// # Endpoint
///
/// `GET /edit_link/{link_id}`
pub async fn edit_link_page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(link_id): Path<i64>,
    flash: IncomingFlash,
) -> Result<Response, AppError> {
    match state.link_service.get_owned_link(current.id(), link_id).await {
        Ok(link) => {
            let mut page = ManageLinksTemplate::editing(&current, link);
            page.flash = flash.message().cloned();
            Ok(flash.render(page))
        }
        Err(AppError::Unauthorized { .. }) => Ok(unauthorized_redirect(&state)),
        Err(e) => Err(e),
    }
}

/// Updates name and URL of one of the caller's links.
///
/// # Endpoint
///
/// `POST /edit_link/{link_id}`
///
/// Unknown ids get 404. Foreign links redirect to the list with an
/// "Unauthorized" flash and stay unchanged.
pub async fn edit_link_submit(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(link_id): Path<i64>,
    Form(input): Form<LinkInput>,
) -> Result<Response, AppError> {
    let (name, url) = (input.name.clone(), input.url.clone());

    match state
        .link_service
        .edit_link(current.id(), link_id, input)
        .await
    {
        Ok(_) => Ok(flash_redirect(
            MANAGE_LINKS,
            Flash::success("Link updated!"),
            state.secure_cookies,
        )),
        Err(AppError::Unauthorized { .. }) => Ok(unauthorized_redirect(&state)),
        Err(e @ AppError::Validation { .. }) => {
            let link = state
                .link_service
                .get_owned_link(current.id(), link_id)
                .await?;
            let page = ManageLinksTemplate {
                form_name: name,
                form_url: url,
                errors: e.user_messages(),
                ..ManageLinksTemplate::editing(&current, link)
            };
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `GET /delete_link/{link_id}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(link_id): Path<i64>,
) -> Result<Response, AppError> {
    match state.link_service.delete_link(current.id(), link_id).await {
        Ok(()) => Ok(flash_redirect(
            MANAGE_LINKS,
            Flash::info("Link deleted"),
            state.secure_cookies,
        )),
        Err(AppError::Unauthorized { .. }) => Ok(unauthorized_redirect(&state)),
        Err(e) => Err(e),
    }
}
