//! Web middleware: session authentication, rate limiting and request tracing.

pub mod rate_limit;
pub mod session_auth;
pub mod tracing;
