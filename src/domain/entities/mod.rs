//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Link`] - A named URL owned by one user
//! - [`Session`] - A server-side login session
//!
//! Creation inputs are separate structs (`NewUser`, `NewLink`, `NewSession`);
//! [`LinkPatch`] carries the editable link fields.

pub mod link;
pub mod session;
pub mod user;

pub use link::{Link, LinkPatch, NewLink};
pub use session::{CurrentUser, NewSession, Session};
pub use user::{NewUser, User};
