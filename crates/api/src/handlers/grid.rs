use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use jamroom_core::{
    errors::BookingError,
    grid::{build_week_grid, WeekGrid},
    ladder::{fetch_window, get_monday, resolve_ladder},
    models::room::Room,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::slot::room_slot_views;
use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    pub room_id: Option<Uuid>,
    #[serde(alias = "roomNumber")]
    pub room_number: Option<i32>,
    /// Any day of the wanted week; defaults to today.
    pub date: Option<NaiveDate>,
}

async fn resolve_room(state: &ApiState, query: &GridQuery) -> Result<Room, AppError> {
    let room = match (query.room_id, query.room_number) {
        (Some(id), _) => state.rooms.find(id).await?,
        (None, Some(number)) => state.rooms.find_by_number(number).await?,
        (None, None) => {
            return Err(
                BookingError::Validation("room_id or room_number is required".to_string()).into(),
            );
        }
    };
    room.ok_or_else(|| BookingError::NotFound("Room not found".to_string()).into())
}

/// Week view of one room: the ladder rows, seven day columns and merged
/// booked spans.
pub async fn get_week_grid(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<GridQuery>, QueryRejection>,
) -> Result<Json<WeekGrid>, AppError> {
    let Query(query) = query?;
    let room = resolve_room(&state, &query).await?;

    let monday = get_monday(query.date.unwrap_or_else(|| Utc::now().date_naive()))?;
    let windows = resolve_ladder(&state.slot_configs.list().await?);
    let views = room_slot_views(&state, room.id, fetch_window(monday)?).await?;

    let grid = build_week_grid(room.id, monday, &windows, &views)?;
    debug!(room_id = %room.id, %monday, cells = grid.cell_count(), "Built week grid");
    Ok(Json(grid))
}
