//! Repository trait for login sessions.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for server-side sessions.
///
/// Sessions are looked up by the HMAC hash of their token; raw tokens never
/// reach the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteSessionRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Finds a session by token hash, expired or not.
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Deletes one session. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes every session that expired at or before `now`.
    ///
    /// Returns the number of removed sessions.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    /// Counts sessions still valid at `now`.
    async fn count_active(&self, now: DateTime<Utc>) -> Result<i64, AppError>;
}
