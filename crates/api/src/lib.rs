//! # Jamroom API
//!
//! The web server for the Jamroom room booking service: slot templates,
//! rooms, bands, user registration, booking requests, direct slot booking
//! and the weekly booking grid.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn HTTP input into repository and workflow calls
//! - **Middleware**: Error mapping and password hashing
//! - **Cache**: Per-room cache of recently fetched slot ranges
//! - **Config**: Environment configuration
//!
//! Handlers only see the repository traits from `jamroom-core`, so the same
//! router runs against PostgreSQL in production and an in-memory store in
//! tests.

/// Per-room slot range cache
pub mod cache;
/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping and password hashing
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use jamroom_core::{
    offset::StorageOffset,
    repository::{
        BandRepository, RequestRepository, RoomRepository, SlotConfigRepository, SlotRepository,
        UserRepository,
    },
    workflow::BookingWorkflow,
};
use jamroom_db::{
    store::{
        PgBandRepository, PgBookingStore, PgRequestRepository, PgRoomRepository,
        PgSlotConfigRepository, PgSlotRepository, PgUserRepository,
    },
    DbPool,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::cache::SlotRangeCache;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub slot_configs: Arc<dyn SlotConfigRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub bands: Arc<dyn BandRepository>,
    pub users: Arc<dyn UserRepository>,
    pub slots: Arc<dyn SlotRepository>,
    pub requests: Arc<dyn RequestRepository>,
    /// Request edits, deletions and direct bookings
    pub workflow: BookingWorkflow,
    pub slot_cache: SlotRangeCache,
}

impl ApiState {
    /// Wires every repository to the given PostgreSQL pool.
    pub fn postgres(pool: DbPool, offset: StorageOffset, cache_ttl: Duration) -> Self {
        Self {
            slot_configs: Arc::new(PgSlotConfigRepository::new(pool.clone())),
            rooms: Arc::new(PgRoomRepository::new(pool.clone())),
            bands: Arc::new(PgBandRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            slots: Arc::new(PgSlotRepository::new(pool.clone())),
            requests: Arc::new(PgRequestRepository::new(pool.clone())),
            workflow: BookingWorkflow::new(Arc::new(PgBookingStore::new(pool)), offset),
            slot_cache: SlotRangeCache::new(cache_ttl),
        }
    }
}

/// Builds the router with every route attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Admin-managed slot templates
        .merge(routes::slot_config::routes())
        .merge(routes::room::routes())
        .merge(routes::band::routes())
        .merge(routes::user::routes())
        // Calendar and booking flow
        .merge(routes::slot::routes())
        .merge(routes::request::routes())
        .merge(routes::grid::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = jamroom_api::config::ApiConfig::from_env()?;
/// let db_pool = jamroom_db::create_pool(&config.database_url).await?;
/// jamroom_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::postgres(
        db_pool,
        config.storage_offset(),
        config.slot_cache_ttl(),
    ));
    info!(
        offset_minutes = config.storage_offset_minutes,
        cache_ttl_seconds = config.slot_cache_ttl_seconds,
        "Booking state ready"
    );

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
