use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/slots",
        get(handlers::slot::list_slots)
            .post(handlers::slot::book_slot)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
