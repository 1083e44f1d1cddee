use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use jamroom_core::{
    errors::BookingError,
    models::band::{Band, CreateBandRequest, NewBand, DEFAULT_BAND_COLOR},
};
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

pub async fn list_bands(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Band>>, AppError> {
    Ok(Json(state.bands.list().await?))
}

pub async fn create_band(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateBandRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Band>), AppError> {
    let Json(payload) = payload?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(BookingError::Validation("Band name is required".to_string()).into());
    }
    let color = payload
        .color
        .filter(|color| !color.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BAND_COLOR.to_string());

    let band = state
        .bands
        .create(NewBand {
            name: name.to_string(),
            color,
        })
        .await?;

    info!(band_id = %band.id, name = %band.name, "Band created");
    Ok((StatusCode::CREATED, Json(band)))
}
