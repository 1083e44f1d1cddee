use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/slotconfig",
        get(handlers::slot_config::list_slot_configs)
            .post(handlers::slot_config::create_slot_config)
            .put(handlers::slot_config::update_slot_config)
            .delete(handlers::slot_config::delete_slot_config)
            .options(handlers::preflight)
            .fallback(handlers::method_not_allowed),
    )
}
