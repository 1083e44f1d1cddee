use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use jamroom_core::{
    errors::BookingError,
    models::user::{NewUser, RegisterUserRequest},
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn register_user(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;

    let (Some(name), Some(username), Some(password), Some(email)) = (
        required(payload.name),
        required(payload.username),
        payload.password.filter(|password| !password.is_empty()),
        required(payload.email),
    ) else {
        return Err(BookingError::Validation("Missing required fields".to_string()).into());
    };

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(BookingError::Validation("User already exists".to_string()).into());
    }

    let hashed_password = auth::hash_password(&password)?;
    let user = state
        .users
        .create(NewUser {
            username,
            name,
            hashed_password,
            role: payload.role.unwrap_or_default(),
            band_id: payload.band_id,
            email,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": user,
        })),
    ))
}
