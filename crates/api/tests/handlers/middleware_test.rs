use axum::{body::to_bytes, http::StatusCode};
use jamroom_api::middleware::{auth, error_handling::map_error};
use jamroom_core::errors::BookingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(BookingError::NotFound("Request not found".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("ID is required".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("Slot is already booked".into()), StatusCode::CONFLICT)]
#[case(BookingError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_client_errors_carry_their_message() {
    let response = map_error(BookingError::Validation("ID is required".to_string()));

    assert_eq!(body_json(response).await, json!({ "message": "ID is required" }));
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let response = map_error(BookingError::Database(eyre::eyre!(
        "password authentication failed for user postgres"
    )));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Internal server error" })
    );
}

#[tokio::test]
async fn test_internal_error_is_server_error() {
    let error = BookingError::Internal(Box::new(std::io::Error::other("Internal error")));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[test]
fn test_each_hash_gets_a_fresh_salt() {
    let first = auth::hash_password("test_password").unwrap();
    let second = auth::hash_password("test_password").unwrap();

    assert_ne!(first, second);
}
