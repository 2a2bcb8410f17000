//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{AccountService, LinkService, ProfileService, SessionSettings};
use crate::infrastructure::persistence::{
    SqliteLinkRepository, SqliteSessionRepository, SqliteUserRepository,
};

pub type SqliteAccountService = AccountService<SqliteUserRepository, SqliteSessionRepository>;
pub type SqliteLinkService = LinkService<SqliteLinkRepository>;
pub type SqliteProfileService = ProfileService<SqliteUserRepository, SqliteLinkRepository>;

/// Cloneable handle to the services and the database pool.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<SqliteAccountService>,
    pub link_service: Arc<SqliteLinkService>,
    pub profile_service: Arc<SqliteProfileService>,
    pub db: Arc<SqlitePool>,
    /// Adds the `Secure` attribute to every cookie the app sets.
    pub secure_cookies: bool,
}

impl AppState {
    /// Wires the SQLite repositories into the services.
    pub fn new(
        db: Arc<SqlitePool>,
        session_settings: SessionSettings,
        secure_cookies: bool,
    ) -> Self {
        let users = Arc::new(SqliteUserRepository::new(db.clone()));
        let links = Arc::new(SqliteLinkRepository::new(db.clone()));
        let sessions = Arc::new(SqliteSessionRepository::new(db.clone()));

        Self {
            account_service: Arc::new(AccountService::new(
                users.clone(),
                sessions,
                session_settings,
            )),
            link_service: Arc::new(LinkService::new(links.clone())),
            profile_service: Arc::new(ProfileService::new(users, links)),
            db,
            secure_cookies,
        }
    }
}
