use std::sync::Arc;

use axum::{extract::State, Json};
use jamroom_core::models::room::Room;

use crate::{middleware::error_handling::AppError, ApiState};

pub async fn list_rooms(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.rooms.list().await?))
}
