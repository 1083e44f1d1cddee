use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use jamroom_core::models::request::{RequestStatus, RequestView, SlotRequest};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::TestContext;

async fn submit(ctx: &TestContext, start: &str, end: &str) -> SlotRequest {
    let response = ctx
        .server
        .post("/requests")
        .json(&json!({
            "user_id": ctx.user.id,
            "slot_start": start,
            "slot_end": end,
            "band_id": "",
            "room_id": ctx.room.id,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn set_status(ctx: &TestContext, id: Uuid, status: &str) -> axum_test::TestResponse {
    ctx.server
        .put("/requests")
        .add_query_param("id", id)
        .json(&json!({ "status": status }))
        .await
}

#[tokio::test]
async fn test_submitted_request_is_pending_and_unshifted() {
    let ctx = TestContext::new().await;

    let request = submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.slot_id, None);
    assert_eq!(request.slot_start.format("%Y-%m-%dT%H:%M").to_string(), "2024-06-03T07:30");
    assert!(ctx.store.slots().await.is_empty());
}

#[tokio::test]
async fn test_approval_creates_offset_slot() {
    let ctx = TestContext::new().await;
    let request = submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;

    let response = set_status(&ctx, request.id, "approved").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Request updated successfully");
    let updated: SlotRequest = serde_json::from_value(body["request"].clone()).unwrap();

    let slots = ctx.store.slots().await;
    assert_eq!(slots.len(), 1);
    assert_eq!(updated.slot_id, Some(slots[0].id));
    assert_eq!(slots[0].slot_start, Utc.with_ymd_and_hms(2024, 6, 3, 13, 0, 0).unwrap());
    assert_eq!(slots[0].band_id, Some(ctx.band.id));
    assert!(updated.response_date.is_some());
}

#[tokio::test]
async fn test_approval_past_calendar_edge_is_bad_request() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/requests")
        .json(&json!({
            "user_id": ctx.user.id,
            "slot_start": "+262142-12-31T20:00",
            "slot_end": "+262142-12-31T21:30",
            "room_id": ctx.room.id,
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let request_id = ctx.store.requests().await[0].id;

    let response = set_status(&ctx, request_id, "approved").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.store.slots().await.is_empty());
    let stored = ctx.store.requests().await;
    assert_eq!(stored[0].status, RequestStatus::Pending);
    assert_eq!(stored[0].slot_id, None);
}

#[tokio::test]
async fn test_time_edit_keeps_slot_id() {
    let ctx = TestContext::new().await;
    let request = submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;
    set_status(&ctx, request.id, "approved").await.assert_status_ok();
    let slot_id = ctx.store.slots().await[0].id;

    ctx.server
        .put("/requests")
        .add_query_param("id", request.id)
        .json(&json!({
            "user_id": "",
            "slot_start": "2024-06-03T10:30",
            "slot_end": "2024-06-03T12:00",
        }))
        .await
        .assert_status_ok();

    let slots = ctx.store.slots().await;
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, slot_id);
    assert_eq!(slots[0].slot_start, Utc.with_ymd_and_hms(2024, 6, 3, 16, 0, 0).unwrap());
    let stored = ctx.store.requests().await;
    assert_eq!(stored[0].user_id, ctx.user.id);
}

#[tokio::test]
async fn test_denial_removes_slot() {
    let ctx = TestContext::new().await;
    let request = submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;
    set_status(&ctx, request.id, "approved").await.assert_status_ok();

    set_status(&ctx, request.id, "denied").await.assert_status_ok();

    assert!(ctx.store.slots().await.is_empty());
    assert_eq!(ctx.store.requests().await[0].slot_id, None);
}

#[tokio::test]
async fn test_delete_approved_request_removes_both() {
    let ctx = TestContext::new().await;
    let request = submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;
    set_status(&ctx, request.id, "approved").await.assert_status_ok();

    let response = ctx
        .server
        .delete("/requests")
        .add_query_param("id", request.id)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Request deleted successfully" }));
    assert!(ctx.store.slots().await.is_empty());
    assert!(ctx.store.requests().await.is_empty());
}

#[tokio::test]
async fn test_overlapping_approval_is_conflict() {
    let ctx = TestContext::new().await;
    let first = submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;
    let second = submit(&ctx, "2024-06-03T08:00", "2024-06-03T09:30").await;
    set_status(&ctx, first.id, "approved").await.assert_status_ok();

    let response = set_status(&ctx, second.id, "approved").await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(ctx.store.slots().await.len(), 1);
}

#[tokio::test]
async fn test_missing_and_unknown_ids() {
    let ctx = TestContext::new().await;

    ctx.server
        .put("/requests")
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .delete("/requests")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .delete("/requests")
        .add_query_param("id", "not-a-uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    set_status(&ctx, Uuid::new_v4(), "approved")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .delete("/requests")
        .add_query_param("id", Uuid::new_v4())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_enriched_and_filterable() {
    let ctx = TestContext::new().await;
    submit(&ctx, "2024-06-03T07:30", "2024-06-03T09:00").await;
    submit(&ctx, "2024-06-04T07:30", "2024-06-04T09:00").await;

    let views: Vec<RequestView> = ctx.server.get("/requests").await.json();
    assert_eq!(views.len(), 2);
    assert!(views[0].request.request_date <= views[1].request.request_date);
    assert_eq!(views[0].user_name.as_deref(), Some(ctx.user.name.as_str()));
    assert_eq!(views[0].band_name.as_deref(), Some("The Offsets"));

    let other_room: Vec<RequestView> = ctx
        .server
        .get("/requests")
        .add_query_param("room_id", ctx.other_room.id)
        .await
        .json();
    assert!(other_room.is_empty());
}

#[tokio::test]
async fn test_inverted_request_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/requests")
        .json(&json!({
            "user_id": ctx.user.id,
            "slot_start": "2024-06-03T09:00",
            "slot_end": "2024-06-03T07:30",
            "room_id": ctx.room.id,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
