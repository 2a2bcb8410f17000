//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Database location
//!
//! ### Method 1: Full URL
//!
//! ```bash
//! export DATABASE_URL="sqlite://bio_links.db?mode=rwc"
//! ```
//!
//! ### Method 2: File path
//!
//! ```bash
//! export DB_PATH="/var/lib/bio-links/data.db"
//! ```
//!
//! If `DATABASE_URL` is not set, it is built from `DB_PATH`. If neither is
//! set, `sqlite://bio_links.db?mode=rwc` in the working directory is used.
//!
//! ## Required Variables
//!
//! - `SESSION_SIGNING_SECRET` - HMAC key for session token hashing
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SESSION_TTL_HOURS` - Lifetime of a normal session (default: 24)
//! - `REMEMBER_ME_DAYS` - Lifetime of a "remember me" session (default: 365)
//! - `SECURE_COOKIES` - Mark cookies `Secure` (default: false)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://bio_links.db?mode=rwc";

/// One year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
/// Ten years.
const MAX_REMEMBER_ME_DAYS: i64 = 3650;

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// HMAC key used to hash session tokens before storage.
    /// Loaded from `SESSION_SIGNING_SECRET`. Must be non-empty.
    pub session_signing_secret: String,
    pub session_ttl_hours: i64,
    pub remember_me_days: i64,
    /// Adds the `Secure` attribute to cookies. Enable when served over HTTPS.
    pub secure_cookies: bool,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("session_signing_secret", &"***")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("remember_me_days", &self.remember_me_days)
            .field("secure_cookies", &self.secure_cookies)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_connect_timeout", &self.db_connect_timeout)
            .finish()
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SIGNING_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url = Self::load_database_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let session_signing_secret =
            env::var("SESSION_SIGNING_SECRET").context("SESSION_SIGNING_SECRET must be set")?;

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            session_signing_secret,
            session_ttl_hours: parse_or("SESSION_TTL_HOURS", 24),
            remember_me_days: parse_or("REMEMBER_ME_DAYS", 365),
            secure_cookies: flag("SECURE_COOKIES"),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            db_connect_timeout: parse_or("DB_CONNECT_TIMEOUT", 30),
        })
    }

    /// Resolves the database URL.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Built from `DB_PATH`
    /// 3. [`DEFAULT_DATABASE_URL`]
    fn load_database_url() -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }

        match env::var("DB_PATH") {
            Ok(path) if !path.is_empty() => format!("sqlite://{path}?mode=rwc"),
            _ => DEFAULT_DATABASE_URL.to_string(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a `sqlite:` URL
    /// - the signing secret is empty
    /// - a TTL is outside its bounds, or a pool setting is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got scheme '{}'",
                self.database_url.split(':').next().unwrap_or_default()
            );
        }

        if self.session_signing_secret.is_empty() {
            anyhow::bail!("SESSION_SIGNING_SECRET must not be empty");
        }

        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
            anyhow::bail!(
                "SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}, got {}",
                self.session_ttl_hours
            );
        }
        if !(1..=MAX_REMEMBER_ME_DAYS).contains(&self.remember_me_days) {
            anyhow::bail!(
                "REMEMBER_ME_DAYS must be between 1 and {MAX_REMEMBER_ME_DAYS}, got {}",
                self.remember_me_days
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Sessions: {}h, remember me {}d, secure cookies: {}",
            self.session_ttl_hours,
            self.remember_me_days,
            self.secure_cookies
        );
    }
}

/// Resolves only the database URL, for tools that need nothing else.
pub fn database_url_from_env() -> String {
    Config::load_database_url()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
