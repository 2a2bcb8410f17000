//! Validated inputs for the application services.
//!
//! These are deserialized straight from HTML form posts. Every field defaults
//! to empty so a missing field surfaces as a validation message instead of a
//! rejected request.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Rejects empty and whitespace-only values.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterInput {
    #[validate(
        custom(function = "not_blank", message = "Username is required"),
        length(min = 3, max = 80, message = "Username must be between 3 and 80 characters")
    )]
    pub username: String,

    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email address"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginInput {
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,

    /// HTML checkbox: present (usually `"on"`) when ticked, absent otherwise.
    pub remember: Option<String>,
}

impl LoginInput {
    pub fn remember_me(&self) -> bool {
        self.remember
            .as_deref()
            .is_some_and(|v| !matches!(v, "" | "0" | "false" | "off"))
    }
}

/// Add/edit link form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LinkInput {
    #[validate(
        custom(function = "not_blank", message = "Link name is required"),
        length(max = 150, message = "Link name must be at most 150 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "not_blank", message = "URL is required"),
        url(message = "Invalid URL"),
        length(max = 300, message = "URL must be at most 300 characters")
    )]
    pub url: String,
}
