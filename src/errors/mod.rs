//! Error handling module for the dealerships backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const SEED_ERROR: &str = "SEED_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Malformed path parameter
    BadRequest(String),
    /// Request body could not be turned into a record
    InvalidPayload(String),
    /// Database error
    Database(String),
    /// Seed file could not be read or parsed
    Seed(String),
    /// Invalid configuration
    Config(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Seed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::InvalidPayload(_) => codes::INVALID_PAYLOAD,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Seed(_) => codes::SEED_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidPayload(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Seed(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
        }
    }
}

impl AppError {
    /// Whether the error still needs logging when it is turned into a response.
    /// Database errors are logged once, on conversion from `sqlx::Error`.
    pub fn logged_on_response(&self) -> bool {
        matches!(self, AppError::InvalidPayload(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

/// Error response body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error on its way to the client.
///
/// Database failures are reported with the endpoint's generic message; their
/// details only go to the log.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(error: AppError, generic_message: &str) -> Self {
        let message = match &error {
            AppError::Database(_) => generic_message.to_string(),
            other => other.message(),
        };

        if error.logged_on_response() {
            tracing::warn!("{} ({})", generic_message, error);
        }

        Self {
            status: error.status_code(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_hides_details() {
        let err = ApiError::new(
            AppError::Database("disk I/O error".to_string()),
            "Error fetching documents",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error fetching documents");
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = ApiError::new(
            AppError::NotFound("Dealer not found".to_string()),
            "Error fetching dealer by id",
        );
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Dealer not found");

        let err = ApiError::new(
            AppError::BadRequest("Invalid dealer id 'abc'".to_string()),
            "Error fetching dealer by id",
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid dealer id 'abc'");
    }

    #[test]
    fn test_store_errors_are_logged_once() {
        assert!(!AppError::Database("locked".to_string()).logged_on_response());
        assert!(!AppError::NotFound("Dealer not found".to_string()).logged_on_response());
        assert!(AppError::InvalidPayload("bad".to_string()).logged_on_response());
    }

    #[test]
    fn test_invalid_payload_is_server_error() {
        let err = AppError::InvalidPayload("missing field `name`".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "INVALID_PAYLOAD: missing field `name`");
    }
}
