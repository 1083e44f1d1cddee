use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use jamroom_core::{
    errors::BookingError,
    models::slot::{instant, BookSlotRequest, SlotView},
    range::DateRange,
    repository::SlotFilter,
    views::compose_slot_views,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(rename = "roomNumber", alias = "room_number")]
    pub room_number: Option<i32>,
}

fn instant_param(name: &str, value: &str) -> Result<DateTime<Utc>, BookingError> {
    instant::parse(value)
        .ok_or_else(|| BookingError::Validation(format!("Invalid {name} timestamp: {value}")))
}

/// Slots of one room within `range`, joined with band names. Served from the
/// range cache when a previous fetch covers `range`.
pub(crate) async fn room_slot_views(
    state: &ApiState,
    room_id: Uuid,
    range: DateRange,
) -> Result<Vec<SlotView>, AppError> {
    if let Some(views) = state.slot_cache.get_covering(room_id, &range).await {
        return Ok(views);
    }

    let generation = state.slot_cache.generation();
    let slots = state
        .slots
        .list(SlotFilter {
            range: Some(range),
            room_id: Some(room_id),
        })
        .await?;
    let views = compose_slot_views(slots, &state.bands.list().await?, &state.rooms.list().await?);

    debug!(%room_id, count = views.len(), "Fetched slot range");
    state
        .slot_cache
        .store(room_id, range, views.clone(), generation)
        .await;
    Ok(views)
}

pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<SlotQuery>, QueryRejection>,
) -> Result<Json<Vec<SlotView>>, AppError> {
    let Query(query) = query?;

    // The range only applies when both ends are given.
    let range = match (query.start.as_deref(), query.end.as_deref()) {
        (Some(start), Some(end)) => Some(DateRange::new(
            instant_param("start", start)?,
            instant_param("end", end)?,
        )?),
        _ => None,
    };

    let room_id = match query.room_number {
        Some(number) => {
            let room = state.rooms.find_by_number(number).await?.ok_or_else(|| {
                BookingError::NotFound(format!("Room with number {} not found", number))
            })?;
            Some(room.id)
        }
        None => None,
    };

    if let (Some(room_id), Some(range)) = (room_id, range) {
        return Ok(Json(room_slot_views(&state, room_id, range).await?));
    }

    let slots = state.slots.list(SlotFilter { range, room_id }).await?;
    let views = compose_slot_views(slots, &state.bands.list().await?, &state.rooms.list().await?);
    Ok(Json(views))
}

pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookSlotRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;

    if state.rooms.find(payload.room_id).await?.is_none() {
        return Err(
            BookingError::NotFound(format!("Room with ID {} not found", payload.room_id)).into(),
        );
    }

    let slot = state.workflow.book_slot(&payload).await?;
    state.slot_cache.invalidate_all();

    info!(slot_id = %slot.id, start = %slot.slot_start, "Slot booked via API");
    Ok(Json(json!({
        "message": "Slot booked successfully",
        "slot": slot,
    })))
}
