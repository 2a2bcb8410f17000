//! Account registration, login and session management.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::{LoginInput, RegisterInput};
use crate::domain::entities::{CurrentUser, NewSession, NewUser, Session, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{PasswordError, hash_password, verify_password};
use crate::utils::token::generate_session_token;

type HmacSha256 = Hmac<Sha256>;

/// Generic message for every failed login, whichever field was wrong.
const WRONG_CREDENTIALS: &str = "Wrong email or password";

/// Session lifetime and token signing configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// HMAC key for hashing session tokens before storage.
    pub signing_secret: String,
    /// Lifetime of an ordinary session.
    pub ttl: Duration,
    /// Lifetime of a "remember me" session.
    pub remember_ttl: Duration,
}

/// A freshly issued session and the raw token to hand to the client.
///
/// The raw token exists only here and in the client's cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
    pub session: Session,
}

/// Service for account registration and session-based authentication.
///
/// Passwords are hashed with Argon2id. Session tokens are hashed with
/// HMAC-SHA256 (keyed by `signing_secret`) before storage, so read access to
/// the database is not enough to hijack a session.
pub struct AccountService<U: UserRepository, S: SessionRepository> {
    users: Arc<U>,
    sessions: Arc<S>,
    settings: SessionSettings,
}

impl<U: UserRepository, S: SessionRepository> AccountService<U, S> {
    /// Creates a new account service.
    pub fn new(users: Arc<U>, sessions: Arc<S>, settings: SessionSettings) -> Self {
        Self {
            users,
            sessions,
            settings,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Hashes a raw session token with HMAC-SHA256 using the signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.settings.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Registers a new account.
    ///
    /// Username and email uniqueness are checked before hashing; a concurrent
    /// registration that slips past the check is still reported as a conflict
    /// by the repository. No session is created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input breaks a form rule.
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        input.validate()?;

        if self
            .users
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Username already taken",
                json!({ "field": "username", "username": input.username }),
            ));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "field": "email" }),
            ));
        }

        let password = input.password;
        let password_hash = run_blocking(move || hash_password(&password)).await?;

        let user = self
            .users
            .create(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues a new session.
    ///
    /// With `remember` set the session lives for `remember_ttl` instead of `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the form is incomplete.
    /// Returns [`AppError::Authentication`] if the email is unknown or the
    /// password does not match; both cases carry the same message.
    pub async fn login(&self, input: LoginInput) -> Result<IssuedSession, AppError> {
        input.validate()?;

        let Some(user) = self.users.find_by_email(&input.email).await? else {
            tracing::info!(reason = "unknown_email", "Login failed");
            return Err(AppError::authentication(WRONG_CREDENTIALS, json!({})));
        };

        let password = input.password.clone();
        let stored_hash = user.password_hash.clone();
        let matches = run_blocking(move || verify_password(&password, &stored_hash)).await?;

        if !matches {
            tracing::info!(user_id = user.id, reason = "wrong_password", "Login failed");
            return Err(AppError::authentication(WRONG_CREDENTIALS, json!({})));
        }

        let persistent = input.remember_me();
        let ttl = if persistent {
            self.settings.remember_ttl
        } else {
            self.settings.ttl
        };

        let token = generate_session_token();
        let session = self
            .sessions
            .create(NewSession {
                token_hash: self.hash_token(&token),
                user_id: user.id,
                persistent,
                expires_at: Utc::now() + ttl,
            })
            .await?;

        tracing::info!(user_id = user.id, persistent, "User logged in");

        Ok(IssuedSession {
            token,
            user,
            session,
        })
    }

    /// Ends the caller's session. Stored users and links are untouched.
    pub async fn logout(&self, current: &CurrentUser) -> Result<(), AppError> {
        self.sessions.delete(current.session_id).await?;

        tracing::info!(user_id = current.id(), "User logged out");

        Ok(())
    }

    /// Resolves a raw session token into the identity it belongs to.
    ///
    /// Expired sessions are deleted on sight.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired, or
    /// its user no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let token_hash = self.hash_token(token);

        let session = self
            .sessions
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({ "reason": "Unknown session" }))
            })?;

        if session.is_expired_at(Utc::now()) {
            if let Err(e) = self.sessions.delete(session.id).await {
                tracing::warn!(session_id = session.id, error = %e, "Failed to delete expired session");
            }
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Session expired" }),
            ));
        }

        let user = self
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({ "reason": "User no longer exists" }))
            })?;

        Ok(CurrentUser {
            user,
            session_id: session.id,
        })
    }

    /// Deletes every expired session. Returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let removed = self.sessions.delete_expired(Utc::now()).await?;

        tracing::info!(removed, "Purged expired sessions");

        Ok(removed)
    }
}

/// Runs CPU-heavy password work off the async executor.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal("Password task failed", json!({ "reason": e.to_string() })))?
        .map_err(AppError::from)
}
