//! SQLite repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! prepared statements.
//!
//! # Repositories
//!
//! - [`SqliteUserRepository`] - Account storage and lookup
//! - [`SqliteLinkRepository`] - Link storage and retrieval
//! - [`SqliteSessionRepository`] - Login session storage
//!
//! Pool construction and migrations live in [`pool`].

pub mod pool;
pub mod sqlite_link_repository;
pub mod sqlite_session_repository;
pub mod sqlite_user_repository;

pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_session_repository::SqliteSessionRepository;
pub use sqlite_user_repository::SqliteUserRepository;
