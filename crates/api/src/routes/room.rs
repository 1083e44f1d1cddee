use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/rooms",
        get(handlers::room::list_rooms)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
