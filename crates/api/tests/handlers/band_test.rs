use axum::http::StatusCode;
use jamroom_core::models::band::{Band, DEFAULT_BAND_COLOR};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_band_defaults_color() {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/bands").json(&json!({ "name": "Night Shift" })).await;

    response.assert_status(StatusCode::CREATED);
    let band: Band = response.json();
    assert_eq!(band.name, "Night Shift");
    assert_eq!(band.color, DEFAULT_BAND_COLOR);
}

#[tokio::test]
async fn test_list_bands_includes_created() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/bands")
        .json(&json!({ "name": "Night Shift", "color": "#ff8800" }))
        .await
        .assert_status(StatusCode::CREATED);

    let bands: Vec<Band> = ctx.server.get("/bands").await.json();

    let names: Vec<&str> = bands.iter().map(|band| band.name.as_str()).collect();
    assert_eq!(names, vec!["Night Shift", "The Offsets"]);
}

#[tokio::test]
async fn test_blank_band_name_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/bands").json(&json!({ "name": "  " })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rooms_ordered_by_number() {
    let ctx = TestContext::new().await;

    let rooms: Vec<jamroom_core::models::room::Room> = ctx.server.get("/rooms").await.json();

    let numbers: Vec<i32> = rooms.iter().map(|room| room.number).collect();
    assert_eq!(numbers, vec![365, 366]);
}
