//! Session entity and the authenticated identity derived from it.

use chrono::{DateTime, Utc};

use super::User;

/// A server-side login session.
///
/// Only an HMAC of the session token is stored; the raw token lives in the
/// client's cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: i64,
    pub token_hash: String,
    pub user_id: i64,
    /// Issued with "remember me"; the cookie outlives the browser session.
    pub persistent: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Input data for creating a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: i64,
    pub persistent: bool,
    pub expires_at: DateTime<Utc>,
}

/// The identity bound to the current request.
///
/// Produced by session authentication and passed explicitly into every
/// operation that needs to know who is calling.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session_id: i64,
}

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}
