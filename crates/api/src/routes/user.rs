use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/users",
        post(handlers::user::register_user)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
