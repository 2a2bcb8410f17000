//! Link entity representing a named URL on a user's profile.

use chrono::{DateTime, Utc};

/// A named URL owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn new(id: i64, name: String, url: String, user_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            url,
            user_id,
            created_at,
        }
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub name: String,
    pub url: String,
    pub user_id: i64,
}

/// Replacement values for an existing link. Only name and URL are editable.
#[derive(Debug, Clone)]
pub struct LinkPatch {
    pub name: String,
    pub url: String,
}
