use std::sync::Arc;

use axum::http::StatusCode;
use jamroom_core::{errors::BookingError, offset::StorageOffset, workflow::BookingWorkflow};
use jamroom_db::mock::repositories::{
    MockBandRepo, MockRequestRepo, MockRoomRepo, MockSlotRepo, MockStore, MockUserRepo,
};
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{in_memory_state, server_for, TestContext};

fn unavailable() -> BookingError {
    BookingError::Database(eyre::eyre!("connection refused"))
}

#[test_log::test(tokio::test)]
async fn test_failed_transaction_start_is_500() {
    let ctx = TestContext::new().await;
    let mut store = MockStore::new();
    store.expect_begin().times(1).returning(|| Err(unavailable()));

    let mut state = in_memory_state(&ctx.store);
    state.workflow = BookingWorkflow::new(Arc::new(store), StorageOffset::default());
    let server = server_for(state);

    let response = server
        .put("/requests")
        .add_query_param("id", Uuid::new_v4())
        .json(&json!({ "status": "approved" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "message": "Internal server error" }));
}

#[test_log::test(tokio::test)]
async fn test_room_lookup_failure_is_500() {
    let mut rooms = MockRoomRepo::new();
    rooms.expect_list().times(1).returning(|| Err(unavailable()));

    let mut state = in_memory_state(&TestContext::new().await.store);
    state.rooms = Arc::new(rooms);

    server_for(state)
        .get("/rooms")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_band_listing_failure_is_500() {
    let mut bands = MockBandRepo::new();
    bands.expect_list().times(1).returning(|| Err(unavailable()));

    let mut state = in_memory_state(&TestContext::new().await.store);
    state.bands = Arc::new(bands);

    server_for(state)
        .get("/bands")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_slot_listing_failure_is_500() {
    let mut slots = MockSlotRepo::new();
    slots.expect_list().times(1).returning(|_| Err(unavailable()));

    let mut state = in_memory_state(&TestContext::new().await.store);
    state.slots = Arc::new(slots);

    server_for(state)
        .get("/slots")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_registration_lookup_failure_creates_nothing() {
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .times(1)
        .returning(|_| Err(unavailable()));
    users.expect_create().never();

    let mut state = in_memory_state(&TestContext::new().await.store);
    state.users = Arc::new(users);

    let response = server_for(state)
        .post("/users")
        .json(&json!({
            "name": "Asha",
            "username": "asha",
            "password": "hunter22",
            "email": "asha@example.com",
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_request_store_conflict_is_409() {
    let ctx = TestContext::new().await;
    let mut requests = MockRequestRepo::new();
    requests
        .expect_create()
        .times(1)
        .returning(|_| Err(BookingError::Conflict("Request already exists".to_string())));

    let mut state = in_memory_state(&ctx.store);
    state.requests = Arc::new(requests);

    let response = server_for(state)
        .post("/requests")
        .json(&json!({
            "user_id": ctx.user.id,
            "slot_start": "2024-06-03T07:30",
            "slot_end": "2024-06-03T09:00",
            "room_id": ctx.room.id,
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "message": "Request already exists" }));
}
