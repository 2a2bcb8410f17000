//! One-shot flash messages carried across a redirect in a cookie.
//!
//! A handler that redirects attaches a [`Flash`] with [`flash_redirect`]. The
//! next page extracts it with [`IncomingFlash`], renders it, and clears the
//! cookie in the same response.

use axum::{
    extract::FromRequestParts,
    http::{header::SET_COOKIE, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::web::cookies::{FLASH_COOKIE, flash_cookie, read_cookie, removal_cookie, to_header_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    /// CSS class suffix used by the templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    /// URL-safe base64 of the JSON form, safe as a cookie value.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decodes a cookie value. Anything tampered or stale yields `None`.
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Redirects to `to` (303) and sets the flash cookie.
pub fn flash_redirect(to: &str, flash: Flash, secure: bool) -> Response {
    let cookie = flash_cookie(&flash.encode(), secure);
    ([(SET_COOKIE, to_header_value(&cookie))], Redirect::to(to)).into_response()
}

/// The flash message sent with this request, if any.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl IncomingFlash {
    pub fn message(&self) -> Option<&Flash> {
        self.0.as_ref()
    }

    /// Renders `page` and clears the flash cookie if one was consumed.
    pub fn render(self, page: impl IntoResponse) -> Response {
        let mut response = page.into_response();
        if self.0.is_some() {
            response
                .headers_mut()
                .append(SET_COOKIE, to_header_value(&removal_cookie(FLASH_COOKIE)));
        }
        response
    }
}

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = read_cookie(&parts.headers, FLASH_COOKIE).and_then(|v| Flash::decode(&v));
        Ok(Self(flash))
    }
}
