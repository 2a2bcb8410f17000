//! Helpers shared across layers.
//!
//! - [`db_error`] - Inspection of SQLite constraint failures
//! - [`password`] - Argon2id password hashing and verification
//! - [`token`] - Session token generation
//! - [`url_check`] - Link URL validation and profile path building

pub mod db_error;
pub mod password;
pub mod token;
pub mod url_check;
