//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing links.
///
/// Ownership is not enforced here; callers check `Link::user_id` before
/// mutating. See [`crate::application::services::LinkService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a missing
    /// owner (foreign key failure).
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists every link of one owner in insertion order.
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Replaces name and URL of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Permanently deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if not found.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;
}
