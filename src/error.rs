//! Error types and HTTP error response handling.
//!
//! Every handler returns `Result<T, AppError>`. This module is the only place
//! where domain errors are turned into HTTP status codes and JSON bodies.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::repository::StoreError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Domain Errors**: a record already exists, or the requested one does not
/// - **Validation Errors**: request fields that fail boundary checks
/// - **Infrastructure Errors**: storage failures and anything unexpected
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A record already exists for the given mobile number.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{resource} already exists with given mobile number {mobile_number}")]
    AlreadyExists {
        resource: &'static str,
        mobile_number: String,
    },

    /// The identity or record addressed by the request does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{resource} not found with the given input data {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// One or more request fields failed validation.
    ///
    /// Returns HTTP 400 Bad Request with field-level messages.
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// No route matches the request path.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("No resource found at the requested path")]
    RouteNotFound,

    /// The path exists but does not accept the request method.
    ///
    /// Returns HTTP 405 Method Not Allowed.
    #[error("Request method is not supported for this path")]
    MethodNotAllowed,

    /// Request body could not be parsed.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500; details are logged, never sent to the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else that should not happen in normal operation.
    ///
    /// Returns HTTP 500.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn not_found(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    pub fn already_exists(resource: &'static str, mobile_number: impl Into<String>) -> Self {
        AppError::AlreadyExists {
            resource,
            mobile_number: mobile_number.into(),
        }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyExists { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Storage conflicts that reach this point were not handled by a service,
/// so they are reported as unexpected.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Conflict(key) => {
                AppError::Unexpected(format!("unhandled unique constraint violation on {key}"))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// JSON body of every error response.
///
/// ```json
/// {
///   "apiPath": "uri=/api/fetch/9876543210",
///   "errorCode": 404,
///   "errorMessage": "Customer not found with the given input data mobileNumber : '9876543210'",
///   "errorTime": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// `apiPath` is filled in by [`crate::middleware::api_path`], which is the
/// only layer that knows the request URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub api_path: String,
    pub error_code: u16,
    pub error_message: String,
    pub error_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
}

/// Flatten validator output into `field -> first message`.
///
/// Nested structs are reported as `parent.field`, list items as `parent[i].field`.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut messages = BTreeMap::new();
    collect_messages(errors, "", &mut messages);
    messages
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{field} is invalid"));
                out.insert(path, message);
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_messages(inner, &format!("{path}."), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, &format!("{path}[{index}]."), out);
                }
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Status Code Mapping
///
/// - `AlreadyExists` → 409 Conflict
/// - `NotFound`, `RouteNotFound` → 404 Not Found
/// - `MethodNotAllowed` → 405 Method Not Allowed
/// - `Validation`, `InvalidRequest` → 400 Bad Request
/// - `Database`, `Unexpected` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, field_errors) = match &self {
            AppError::Validation(errors) => (self.to_string(), Some(field_messages(errors))),
            AppError::Database(_) | AppError::Unexpected(_) => {
                tracing::error!(error = %self, "request failed");
                ("An internal error occurred".to_string(), None)
            }
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            api_path: String::new(),
            error_code: status.as_u16(),
            error_message: message,
            error_time: Utc::now(),
            field_errors,
        };

        // The api_path layer rewrites the body once the request path is known
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::already_exists("Loan", "9876543210").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("Card", "mobileNumber", "9876543210").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unexpected("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_field_and_value() {
        let err = AppError::not_found("Customer", "mobileNumber", "9876543210");
        assert_eq!(
            err.to_string(),
            "Customer not found with the given input data mobileNumber : '9876543210'"
        );
    }

    #[test]
    fn validation_response_carries_field_messages() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("mobile_number");
        error.message = Some("Mobile number must be 10 digits".into());
        errors.add("mobile_number", error);

        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.error_code, 400);
        assert_eq!(
            body.field_errors
                .as_ref()
                .and_then(|f| f.get("mobile_number"))
                .map(String::as_str),
            Some("Mobile number must be 10 digits")
        );
    }

    #[test]
    fn internal_errors_are_masked() {
        let response = AppError::Unexpected("secret detail".into()).into_response();
        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.error_message, "An internal error occurred");
    }
}
