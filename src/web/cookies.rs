//! Cookie names, builders and parsing.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use cookie::{Cookie, SameSite, time::Duration};

/// Holds the raw session token.
pub const SESSION_COOKIE: &str = "session";

/// Holds a one-shot flash message.
pub const FLASH_COOKIE: &str = "flash";

/// Finds a cookie value across all `Cookie` headers of a request.
///
/// Malformed pairs are skipped.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Session cookie carrying the raw token.
///
/// Without `max_age` it is a browser-session cookie; with it the browser
/// keeps it across restarts (remember me).
pub fn session_cookie(token: &str, max_age: Option<Duration>, secure: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);

    if let Some(max_age) = max_age {
        builder = builder.max_age(max_age);
    }

    builder.build()
}

/// Short-lived cookie carrying an encoded flash message.
pub fn flash_cookie(encoded: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, encoded.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(5))
        .build()
}

/// A cookie that makes the browser drop `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").http_only(true).build();
    cookie.make_removal();
    cookie
}

/// Renders a cookie as a `Set-Cookie` header value.
///
/// Names and values come from this module or from base64/token alphabets, so
/// the rendered header is always valid ASCII.
pub fn to_header_value(cookie: &Cookie<'_>) -> HeaderValue {
    HeaderValue::from_str(&cookie.to_string()).unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_many() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123; flash=xyz"),
        );

        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("abc123"));
        assert_eq!(read_cookie(&headers, FLASH_COOKIE).as_deref(), Some("xyz"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("session=abc123"));

        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let rendered = session_cookie("tok", None, false).to_string();

        assert!(rendered.starts_with("session=tok"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(!rendered.contains("Max-Age"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_remember_me_cookie_has_max_age() {
        let rendered = session_cookie("tok", Some(Duration::days(365)), true).to_string();

        assert!(rendered.contains("Max-Age=31536000"));
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn test_removal_cookie() {
        let rendered = removal_cookie(SESSION_COOKIE).to_string();

        assert!(rendered.starts_with("session="));
        assert!(rendered.contains("Max-Age=0"));
    }
}
