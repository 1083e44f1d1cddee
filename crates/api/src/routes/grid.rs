use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/grid",
        get(handlers::grid::get_week_grid)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
