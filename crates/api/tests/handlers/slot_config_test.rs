use axum::http::StatusCode;
use jamroom_core::{errors::BookingError, models::slot_config::SlotConfig};
use jamroom_db::mock::{repositories::MockSlotConfigRepo, InMemoryStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::test_utils::{in_memory_state, server_for, TestContext};

#[tokio::test]
async fn test_create_and_list_slot_configs_in_order() {
    let ctx = TestContext::new().await;

    for (start, end) in [("09:00", "10:30"), ("07:30", "09:00")] {
        let response = ctx
            .server
            .post("/slotconfig")
            .json(&json!({ "start_time": start, "end_time": end }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let configs: Vec<SlotConfig> = ctx.server.get("/slotconfig").await.json();
    let starts: Vec<String> = configs
        .iter()
        .map(|config| config.start_time.format("%H:%M").to_string())
        .collect();
    assert_eq!(starts, vec!["07:30", "09:00"]);
    assert!(configs.iter().all(|config| config.enabled));
}

#[tokio::test]
async fn test_create_rejects_inverted_window() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/slotconfig")
        .json(&json!({ "start_time": "10:00", "end_time": "09:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_toggles_enabled() {
    let ctx = TestContext::new().await;
    let created: SlotConfig = ctx
        .server
        .post("/slotconfig")
        .json(&json!({ "start_time": "07:30:00", "end_time": "09:00:00" }))
        .await
        .json();

    let response = ctx
        .server
        .put("/slotconfig")
        .json(&json!({ "id": created.id, "enabled": false }))
        .await;

    response.assert_status_ok();
    let updated: SlotConfig = response.json();
    assert!(!updated.enabled);
    assert_eq!(updated.start_time, created.start_time);
}

#[tokio::test]
async fn test_update_without_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/slotconfig")
        .json(&json!({ "enabled": false }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "ID is required" }));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/slotconfig")
        .json(&json!({ "id": Uuid::new_v4(), "enabled": false }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_slot_config() {
    let ctx = TestContext::new().await;
    let created: SlotConfig = ctx
        .server
        .post("/slotconfig")
        .json(&json!({ "start_time": "07:30", "end_time": "09:00" }))
        .await
        .json();

    let response = ctx
        .server
        .delete("/slotconfig")
        .json(&json!({ "id": created.id }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Slot configuration deleted");

    let again = ctx
        .server
        .delete("/slotconfig")
        .json(&json!({ "id": created.id }))
        .await;
    again.assert_status(StatusCode::NOT_FOUND);

    let missing_id = ctx.server.delete("/slotconfig").json(&json!({})).await;
    missing_id.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let ctx = TestContext::new().await;

    let response = ctx.server.patch("/slotconfig").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    response.assert_json(&json!({ "message": "Method not allowed" }));
}

#[tokio::test]
async fn test_preflight_is_a_no_op() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .method(axum::http::Method::OPTIONS, "/slotconfig")
        .await;

    response.assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_repository_failure_is_500_without_details() {
    let mut repo = MockSlotConfigRepo::new();
    repo.expect_list()
        .times(1)
        .returning(|| Err(BookingError::Database(eyre::eyre!("connection refused"))));

    let mut state = in_memory_state(&InMemoryStore::new());
    state.slot_configs = Arc::new(repo);
    let server = server_for(state);

    let response = server.get("/slotconfig").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "message": "Internal server error" }));
}
