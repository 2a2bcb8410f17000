//! Link management service.

use std::sync::Arc;

use serde_json::json;
use validator::Validate;

use crate::application::dto::LinkInput;
use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_check::check_link_url;

/// Service for creating, listing, editing and deleting a user's links.
///
/// Every mutating operation takes the caller's id and refuses to touch links
/// owned by someone else.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Adds a link to the owner's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank or too long, or
    /// the URL is not an absolute http(s) URL.
    pub async fn add_link(&self, owner_id: i64, input: LinkInput) -> Result<Link, AppError> {
        let (name, url) = Self::validated(input)?;

        let link = self
            .link_repository
            .create(NewLink {
                name,
                url,
                user_id: owner_id,
            })
            .await?;

        tracing::info!(link_id = link.id, user_id = owner_id, "Link added");

        Ok(link)
    }

    /// Lists the owner's links in creation order.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(owner_id).await
    }

    /// Loads a link the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Unauthorized`] if it belongs to another user.
    pub async fn get_owned_link(&self, caller_id: i64, link_id: i64) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": link_id })))?;

        if !link.is_owned_by(caller_id) {
            tracing::warn!(link_id, caller_id, owner_id = link.user_id, "Link ownership mismatch");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "link_id": link_id }),
            ));
        }

        Ok(link)
    }

    /// Replaces the name and URL of a link the caller owns.
    ///
    /// Ownership is checked before the input, so a foreign link is refused
    /// even when the form is invalid.
    ///
    /// # Errors
    ///
    /// See [`Self::get_owned_link`] and [`Self::add_link`].
    pub async fn edit_link(
        &self,
        caller_id: i64,
        link_id: i64,
        input: LinkInput,
    ) -> Result<Link, AppError> {
        self.get_owned_link(caller_id, link_id).await?;

        let (name, url) = Self::validated(input)?;

        let link = self
            .link_repository
            .update(link_id, LinkPatch { name, url })
            .await?;

        tracing::info!(link_id, user_id = caller_id, "Link updated");

        Ok(link)
    }

    /// Deletes a link the caller owns.
    ///
    /// # Errors
    ///
    /// See [`Self::get_owned_link`].
    pub async fn delete_link(&self, caller_id: i64, link_id: i64) -> Result<(), AppError> {
        self.get_owned_link(caller_id, link_id).await?;

        if !self.link_repository.delete(link_id).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        tracing::info!(link_id, user_id = caller_id, "Link deleted");

        Ok(())
    }

    fn validated(input: LinkInput) -> Result<(String, String), AppError> {
        input.validate()?;

        let url = check_link_url(&input.url).map_err(|e| {
            AppError::bad_request("Validation failed", json!({ "url": [e.to_string()] }))
        })?;

        Ok((input.name.trim().to_string(), url))
    }
}
