//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON `{ "message": ... }`
//! body. Server-side failures are logged in full and rendered with a generic
//! message so no internals reach the client.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jamroom_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use jamroom_api::middleware::error_handling::AppError;
/// use jamroom_core::errors::BookingError;
///
/// async fn handler(id: Option<String>) -> Result<Json<String>, AppError> {
///     let id = id.ok_or_else(|| BookingError::Validation("ID is required".into()))?;
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            BookingError::Database(_) | BookingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            BookingError::NotFound(message)
            | BookingError::Validation(message)
            | BookingError::Conflict(message) => message.clone(),
            BookingError::MethodNotAllowed => "Method not allowed".to_string(),
            BookingError::Database(_) | BookingError::Internal(_) => {
                error!("Request failed: {:?}", self.0);
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Wraps untyped failures in `BookingError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Malformed bodies are validation errors rather than axum's plain-text 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(BookingError::Validation(rejection.body_text()))
    }
}

/// Maps a BookingError straight to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
