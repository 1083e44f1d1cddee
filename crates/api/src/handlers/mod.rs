pub mod band;
pub mod grid;
pub mod request;
pub mod room;
pub mod slot;
pub mod slot_config;
pub mod user;

use axum::{http::StatusCode, response::Response};
use jamroom_core::errors::BookingError;
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::error_handling::map_error;

/// `?id=<uuid>` as sent by the request admin page.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn require(&self) -> Result<Uuid, BookingError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BookingError::Validation("ID is required".to_string()))?;

        Uuid::parse_str(raw).map_err(|_| BookingError::Validation(format!("Invalid ID: {raw}")))
    }
}

/// CORS preflight no-op.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Response {
    map_error(BookingError::MethodNotAllowed)
}
