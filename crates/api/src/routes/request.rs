use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/requests",
        get(handlers::request::list_requests)
            .post(handlers::request::create_request)
            .put(handlers::request::update_request)
            .delete(handlers::request::delete_request)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
