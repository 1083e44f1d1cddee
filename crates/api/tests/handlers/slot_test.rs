use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use jamroom_core::models::slot::{NewSlot, SlotStatus, SlotView};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_book_slot_and_list_by_room() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({
            "slot_start": "2024-06-03T10:00:00Z",
            "band_id": ctx.band.id,
            "room_id": ctx.room.id,
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Slot booked successfully");

    let slots: Vec<SlotView> = ctx
        .server
        .get("/slots")
        .add_query_param("start", "2024-06-03T00:00:00Z")
        .add_query_param("end", "2024-06-04T00:00:00Z")
        .add_query_param("roomNumber", 365)
        .await
        .json();

    assert_eq!(slots.len(), 1);
    let view = &slots[0];
    assert_eq!(view.slot.slot_end, Utc.with_ymd_and_hms(2024, 6, 3, 11, 30, 0).unwrap());
    assert_eq!(view.band_name.as_deref(), Some("The Offsets"));
    assert_eq!(view.room_number, Some(365));
}

#[tokio::test]
async fn test_book_slot_accepts_naive_start() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({
            "slot_start": "2024-06-04T10:00",
            "band_id": ctx.band.id,
            "room_id": ctx.room.id,
        }))
        .await;

    response.assert_status_ok();
    let slots = ctx.store.slots().await;
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].slot_start, Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap());
    assert_eq!(slots[0].slot_end, Utc.with_ymd_and_hms(2024, 6, 4, 11, 30, 0).unwrap());
}

#[tokio::test]
async fn test_double_booking_is_conflict() {
    let ctx = TestContext::new().await;
    let body = json!({
        "slot_start": "2024-06-03T10:00:00Z",
        "slot_end": "2024-06-03T11:30:00Z",
        "band_id": ctx.band.id,
        "room_id": ctx.room.id,
    });

    ctx.server.post("/slots").json(&body).await.assert_status_ok();
    let response = ctx.server.post("/slots").json(&body).await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "message": "Slot is already booked" }));
}

#[tokio::test]
async fn test_list_filters_range_inclusively_and_by_room() {
    let ctx = TestContext::new().await;
    for (room_id, hour) in [(ctx.room.id, 10), (ctx.room.id, 12), (ctx.other_room.id, 10)] {
        let slot_start = Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap();
        ctx.store
            .add_slot(NewSlot {
                slot_start,
                slot_end: slot_start + chrono::Duration::minutes(90),
                status: SlotStatus::Booked,
                band_id: None,
                room_id,
            })
            .await;
    }

    let slots: Vec<SlotView> = ctx
        .server
        .get("/slots")
        .add_query_param("start", "2024-06-03T10:00:00Z")
        .add_query_param("end", "2024-06-03T10:00:00Z")
        .add_query_param("roomNumber", 365)
        .await
        .json();
    assert_eq!(slots.len(), 1);

    let everything: Vec<SlotView> = ctx.server.get("/slots").await.json();
    assert_eq!(everything.len(), 3);
    assert!(everything
        .windows(2)
        .all(|pair| pair[0].slot.slot_start <= pair[1].slot.slot_start));
}

#[tokio::test]
async fn test_cached_range_sees_new_booking() {
    let ctx = TestContext::new().await;
    let fetch = || {
        ctx.server
            .get("/slots")
            .add_query_param("start", "2024-06-01")
            .add_query_param("end", "2024-06-30")
            .add_query_param("roomNumber", 365)
    };

    let before: Vec<SlotView> = fetch().await.json();
    assert!(before.is_empty());

    ctx.server
        .post("/slots")
        .json(&json!({ "slot_start": "2024-06-03T10:00:00Z", "room_id": ctx.room.id }))
        .await
        .assert_status_ok();

    let after: Vec<SlotView> = fetch().await.json();
    assert_eq!(after.len(), 1);
}

#[tokio::test]
async fn test_invalid_inputs() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/slots")
        .add_query_param("start", "yesterday")
        .add_query_param("end", "2024-06-30")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/slots")
        .add_query_param("roomNumber", 999)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .post("/slots")
        .json(&json!({ "slot_start": "2024-06-03T10:00:00Z", "room_id": Uuid::new_v4() }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .post("/slots")
        .json(&json!({ "room_id": ctx.room.id }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .delete("/slots")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
