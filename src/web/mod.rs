//! Browser-facing layer.
//!
//! Server-rendered HTML pages (Askama templates), the cookie session
//! middleware and one-shot flash messages.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Session auth, rate limiting, request tracing
//! - [`routes`] - Route tables
//! - [`flash`] - Flash messages carried across redirects
//! - [`cookies`] - Cookie builders and parsing

pub mod cookies;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
