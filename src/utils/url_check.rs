//! Link URL validation and public profile path building.

use url::Url;

/// Why a link URL was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlCheckError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a link target URL and returns it trimmed.
///
/// The URL is stored as the user typed it; parsing only decides acceptance.
///
/// # Rules
///
/// 1. Must parse as an absolute URL
/// 2. Scheme must be `http` or `https` (rejects `javascript:`, `data:`, `file:`)
/// 3. Must have a non-empty host
///
/// # Examples
///
/// ```ignore
/// assert_eq!(check_link_url(" https://alice.dev ").unwrap(), "https://alice.dev");
/// assert!(check_link_url("javascript:alert(1)").is_err());
/// ```
pub fn check_link_url(input: &str) -> Result<String, UrlCheckError> {
    let trimmed = input.trim();

    let url = Url::parse(trimmed).map_err(|e| UrlCheckError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlCheckError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(UrlCheckError::MissingHost),
    }
}

/// Builds the path of a user's public profile, percent-encoding the username.
///
/// ```ignore
/// assert_eq!(profile_path("alice"), "/user/alice");
/// assert_eq!(profile_path("a b"), "/user/a%20b");
/// ```
pub fn profile_path(username: &str) -> String {
    let mut url = Url::parse("http://localhost/user").expect("static base URL is valid");

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(username);
    }

    url.path().to_string()
}
