//! REST API module.
//!
//! Handlers answer with the bare documents on success and `{ "error": ... }` on failure.

mod dealers;
mod reviews;

pub use dealers::*;
pub use reviews::*;

use axum::Json;
use serde::Serialize;

use crate::errors::{ApiError, AppError};

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Create an error API response; database failures are reported as `generic_message`.
pub fn error<T: Serialize>(err: AppError, generic_message: &str) -> ApiResult<T> {
    Err(ApiError::new(err, generic_message))
}

/// Parse an integer id path segment.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} id '{}'", what, raw)))
}

/// GET / - Welcome text.
pub async fn welcome() -> &'static str {
    "Welcome to the Dealerships API"
}
