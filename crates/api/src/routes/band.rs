use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/bands",
        get(handlers::band::list_bands)
            .post(handlers::band::create_band)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
