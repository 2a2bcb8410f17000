//! # Bio Links
//!
//! A link-in-bio service built with Axum and SQLite: users register, sign
//! in, and publish a list of named links at `/user/{username}`.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities and repository traits
//! - **Application Layer** ([`application`]) - Accounts, link management, profiles
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **Web Layer** ([`web`]) - HTML pages, cookie sessions, flash messages
//!
//! ## Quick Start
//!
//! ```bash
//! export SESSION_SIGNING_SECRET="$(openssl rand -hex 32)"
//! export DATABASE_URL="sqlite://bio_links.db?mode=rwc"  # Optional
//!
//! # Migrations are applied at startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;
