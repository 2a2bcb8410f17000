//! Application error taxonomy and its HTTP rendering.
//!
//! Every failure a request can hit is one [`AppError`] variant. Handlers that
//! want a friendlier surface (re-rendered forms, flash + redirect) match on the
//! variant first; anything that escapes a handler is rendered as an HTML error
//! page with the variant's status code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use validator::ValidationErrors;

use crate::utils::db_error::unique_violation_target;
use crate::utils::password::PasswordError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: length, email, URL or confirmation constraints.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Wrong credentials. The message never says which field was wrong.
    #[error("{message}")]
    Authentication { message: String, details: Value },

    /// Missing session or ownership mismatch.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Unique username or email already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn authentication(message: impl Into<String>, details: Value) -> Self {
        Self::Authentication {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Messages safe to show next to a form.
    ///
    /// Validation errors expand to one message per failed field rule, sorted by
    /// field name so the order is stable. Internal errors never leak details.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            AppError::Validation { message, details } => {
                let Some(fields) = details.as_object() else {
                    return vec![message.clone()];
                };
                let mut names: Vec<&String> = fields.keys().collect();
                names.sort();
                let messages: Vec<String> = names
                    .into_iter()
                    .filter_map(|name| fields.get(name).and_then(Value::as_array))
                    .flatten()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect();
                if messages.is_empty() {
                    vec![message.clone()]
                } else {
                    messages
                }
            }
            AppError::Internal { .. } => vec!["Something went wrong, please try again".to_string()],
            other => vec![other.to_string()],
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    title: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Internal { message, details } = &self {
            tracing::error!(%message, %details, "request failed");
        }

        let message = match &self {
            AppError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let page = ErrorTemplate {
            status: status.as_u16(),
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message,
        };

        (status, page).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();

        for (field, errs) in errors.field_errors() {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| {
                    let text = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid ({})", e.code));
                    Value::String(text)
                })
                .collect();
            fields.insert(field.to_string(), Value::Array(messages));
        }

        AppError::bad_request("Validation failed", Value::Object(fields))
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(target) = unique_violation_target(&e) {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": target }),
        );
    }

    if matches!(e, sqlx::Error::RowNotFound) {
        return AppError::not_found("Record not found", json!({}));
    }

    AppError::internal("Database error", json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Name is too short"))]
        name: String,
        #[validate(email(message = "Invalid email address"))]
        email: String,
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::authentication("x", json!({})).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_become_field_messages() {
        let sample = Sample {
            name: "ab".to_string(),
            email: "nope".to_string(),
        };

        let err: AppError = sample.validate().unwrap_err().into();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(
            err.user_messages(),
            vec![
                "Invalid email address".to_string(),
                "Name is too short".to_string()
            ]
        );
    }

    #[test]
    fn test_internal_messages_are_not_leaked() {
        let err = AppError::internal("Database error", json!({ "reason": "disk on fire" }));
        assert_eq!(
            err.user_messages(),
            vec!["Something went wrong, please try again".to_string()]
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
