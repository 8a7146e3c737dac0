//! Seed Inventory Library
//!
//! Server-rendered web application for tracking seed stock, backed by SQLite.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod repositories;
pub mod telemetry;
pub mod views;

use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::repositories::SeedRepository;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub seeds: Arc<dyn SeedRepository>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(seeds: Arc<dyn SeedRepository>, config: config::AppConfig) -> Self {
        Self { seeds, config }
    }
}

/// All page and health routes, still waiting for their state.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::seeds::seed_routes())
        .merge(handlers::health::health_routes())
}

/// The fully layered application router.
///
/// The request id middleware sits outermost so the trace span and the error
/// pages can both see the id.
pub fn build_router(state: AppState) -> Router {
    app_routes()
        // HTTP tracing layer for consistent request/response telemetry
        .layer(telemetry::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::errors::ServiceError;
    pub use crate::models::{NewSeed, Seed, SeedChanges, StatusSummary};
    pub use crate::repositories::{SeaOrmSeedRepository, SeedRepository};
    pub use crate::{build_router, AppState};
}
