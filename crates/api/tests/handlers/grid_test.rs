use axum::http::StatusCode;
use jamroom_core::{grid::WeekGrid, models::slot::SlotStatus};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::TestContext;

async fn add_window(ctx: &TestContext, start: &str, end: &str) {
    ctx.server
        .post("/slotconfig")
        .json(&json!({ "start_time": start, "end_time": end }))
        .await
        .assert_status(StatusCode::CREATED);
}

async fn week(ctx: &TestContext, date: &str) -> WeekGrid {
    let response = ctx
        .server
        .get("/grid")
        .add_query_param("room_number", 365)
        .add_query_param("date", date)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_grid_has_one_cell_per_day_and_window() {
    let ctx = TestContext::new().await;
    add_window(&ctx, "10:00", "11:30").await;
    add_window(&ctx, "11:30", "13:00").await;

    let grid = week(&ctx, "2024-06-09").await;

    assert_eq!(grid.week_start.to_string(), "2024-06-03");
    assert_eq!(grid.previous_week.to_string(), "2024-05-27");
    assert_eq!(grid.next_week.to_string(), "2024-06-10");
    assert_eq!(grid.cell_count(), 14);
    assert!(grid
        .days
        .iter()
        .flat_map(|day| day.cells.iter())
        .all(|cell| cell.status == SlotStatus::Available));
}

#[tokio::test]
async fn test_same_band_bookings_merge_into_one_span() {
    let ctx = TestContext::new().await;
    add_window(&ctx, "10:00", "11:30").await;
    add_window(&ctx, "11:30", "13:00").await;
    add_window(&ctx, "13:00", "14:30").await;
    for start in ["2024-06-04T10:00:00Z", "2024-06-04T11:30:00Z", "2024-06-04T13:00:00Z"] {
        ctx.server
            .post("/slots")
            .json(&json!({ "slot_start": start, "band_id": ctx.band.id, "room_id": ctx.room.id }))
            .await
            .assert_status_ok();
    }

    let grid = week(&ctx, "2024-06-04").await;

    let head = grid.cell("2024-06-04", "10:00").unwrap();
    assert_eq!(head.row_span, 3);
    assert_eq!(head.band_name.as_deref(), Some("The Offsets"));
    for key in ["11:30", "13:00"] {
        let covered = grid.cell("2024-06-04", key).unwrap();
        assert_eq!(covered.row_span, 0);
        assert!(!covered.show);
    }
}

#[tokio::test]
async fn test_denied_request_frees_grid_cell() {
    let ctx = TestContext::new().await;
    add_window(&ctx, "13:00", "14:30").await;
    let request: jamroom_core::models::request::SlotRequest = ctx
        .server
        .post("/requests")
        .json(&json!({
            "user_id": ctx.user.id,
            "slot_start": "2024-06-03T07:30",
            "slot_end": "2024-06-03T09:00",
            "room_id": ctx.room.id,
        }))
        .await
        .json();

    ctx.server
        .put("/requests")
        .add_query_param("id", request.id)
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status_ok();
    let booked = week(&ctx, "2024-06-03").await;
    assert_eq!(
        booked.cell("2024-06-03", "13:00").unwrap().status,
        SlotStatus::Booked
    );

    ctx.server
        .put("/requests")
        .add_query_param("id", request.id)
        .json(&json!({ "status": "denied" }))
        .await
        .assert_status_ok();
    let freed = week(&ctx, "2024-06-03").await;
    assert_eq!(
        freed.cell("2024-06-03", "13:00").unwrap().status,
        SlotStatus::Available
    );
}

#[tokio::test]
async fn test_grid_room_is_required_and_must_exist() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/grid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .get("/grid")
        .add_query_param("room_number", 1)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grid_at_calendar_edge_is_bad_request() {
    let ctx = TestContext::new().await;
    add_window(&ctx, "10:00", "11:30").await;

    let response = ctx
        .server
        .get("/grid")
        .add_query_param("room_number", 365)
        .add_query_param("date", "+262142-12-31")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("outside the supported calendar"));
}

#[tokio::test]
async fn test_grid_ignores_other_rooms() {
    let ctx = TestContext::new().await;
    add_window(&ctx, "10:00", "11:30").await;
    ctx.server
        .post("/slots")
        .json(&json!({ "slot_start": "2024-06-04T10:00:00Z", "room_id": ctx.other_room.id }))
        .await
        .assert_status_ok();

    let grid = week(&ctx, "2024-06-04").await;

    assert_eq!(
        grid.cell("2024-06-04", "10:00").unwrap().status,
        SlotStatus::Available
    );
}
