//! Business logic services for the application layer.

pub mod account_service;
pub mod link_service;
pub mod profile_service;

pub use account_service::{AccountService, IssuedSession, SessionSettings};
pub use link_service::LinkService;
pub use profile_service::{Profile, ProfileService};
