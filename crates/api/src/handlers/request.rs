use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use jamroom_core::{
    errors::BookingError,
    models::request::{CreateSlotRequest, NewSlotRequest, RequestChanges, RequestView, SlotRequest},
    views::compose_request_views,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::IdQuery;
use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct RequestListQuery {
    pub room_id: Option<Uuid>,
}

pub async fn list_requests(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<RequestListQuery>, QueryRejection>,
) -> Result<Json<Vec<RequestView>>, AppError> {
    let Query(query) = query?;

    let requests = state.requests.list(query.room_id).await?;
    let users = state.users.list().await?;
    let bands = state.bands.list().await?;

    Ok(Json(compose_request_views(requests, &users, &bands)))
}

pub async fn create_request(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SlotRequest>), AppError> {
    let Json(payload) = payload?;

    if payload.slot_end <= payload.slot_start {
        return Err(BookingError::Validation("slot_end must be after slot_start".to_string()).into());
    }
    if state.users.find(payload.user_id).await?.is_none() {
        return Err(
            BookingError::NotFound(format!("User with ID {} not found", payload.user_id)).into(),
        );
    }
    if state.rooms.find(payload.room_id).await?.is_none() {
        return Err(
            BookingError::NotFound(format!("Room with ID {} not found", payload.room_id)).into(),
        );
    }

    let request = state.requests.create(NewSlotRequest::from(payload)).await?;

    info!(request_id = %request.id, user_id = %request.user_id, "Request submitted");
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn update_request(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<RequestChanges>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let id = query.require()?;
    let Json(changes) = payload?;

    if let Some(room_id) = changes.room_id {
        if state.rooms.find(room_id).await?.is_none() {
            return Err(BookingError::NotFound(format!("Room with ID {} not found", room_id)).into());
        }
    }

    let request = state.workflow.update_request(id, &changes).await?;
    state.slot_cache.invalidate_all();

    Ok(Json(json!({
        "message": "Request updated successfully",
        "request": request,
    })))
}

pub async fn delete_request(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let id = query.require()?;

    state.workflow.delete_request(id).await?;
    state.slot_cache.invalidate_all();

    Ok(Json(json!({ "message": "Request deleted successfully" })))
}
