//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::account_service::AccountService`] - Registration, login, sessions
//! - [`services::link_service::LinkService`] - Owner-checked link management
//! - [`services::profile_service::ProfileService`] - Public profile lookup
//!
//! Service inputs live in [`dto`] and carry their own validation rules.

pub mod dto;
pub mod services;
