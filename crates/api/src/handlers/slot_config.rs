use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use jamroom_core::{
    errors::BookingError,
    models::slot_config::{
        CreateSlotConfigRequest, DeleteSlotConfigRequest, SlotConfig, SlotConfigChanges,
        UpdateSlotConfigRequest,
    },
};
use serde_json::{json, Value};
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

fn not_found() -> AppError {
    BookingError::NotFound("Slot configuration not found".to_string()).into()
}

fn id_required() -> AppError {
    BookingError::Validation("ID is required".to_string()).into()
}

pub async fn list_slot_configs(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<SlotConfig>>, AppError> {
    Ok(Json(state.slot_configs.list().await?))
}

pub async fn create_slot_config(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateSlotConfigRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SlotConfig>), AppError> {
    let Json(payload) = payload?;

    if payload.end_time <= payload.start_time {
        return Err(BookingError::Validation("end_time must be after start_time".to_string()).into());
    }

    let config = state
        .slot_configs
        .create(payload.start_time, payload.end_time, payload.enabled)
        .await?;

    info!(config_id = %config.id, start = %config.start_time, "Slot config created");
    Ok((StatusCode::CREATED, Json(config)))
}

pub async fn update_slot_config(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<UpdateSlotConfigRequest>, JsonRejection>,
) -> Result<Json<SlotConfig>, AppError> {
    let Json(payload) = payload?;
    let id = payload.id.ok_or_else(id_required)?;

    let changes = SlotConfigChanges::from(&payload);
    if let (Some(start), Some(end)) = (changes.start_time, changes.end_time) {
        if end <= start {
            return Err(BookingError::Validation("end_time must be after start_time".to_string()).into());
        }
    }

    let config = state
        .slot_configs
        .update(id, changes)
        .await?
        .ok_or_else(not_found)?;

    info!(config_id = %id, enabled = config.enabled, "Slot config updated");
    Ok(Json(config))
}

pub async fn delete_slot_config(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<DeleteSlotConfigRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let id = payload.id.ok_or_else(id_required)?;

    if !state.slot_configs.delete(id).await? {
        return Err(not_found());
    }

    info!(config_id = %id, "Slot config deleted");
    Ok(Json(json!({ "message": "Slot configuration deleted" })))
}
