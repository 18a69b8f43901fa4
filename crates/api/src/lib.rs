//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the rollup engine
//! - JSON error responses
//!
//! Callers post the rows they fetched from the data store; the service keeps
//! no state between requests beyond the configured rollup defaults.

pub mod error;
pub mod routes;

use axum::Router;
use buildledger_shared::config::RollupConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Rollup defaults applied when a request does not override them.
    pub rollup: Arc<RollupConfig>,
}

impl AppState {
    /// Creates the state from loaded rollup defaults.
    #[must_use]
    pub fn new(rollup: RollupConfig) -> Self {
        Self {
            rollup: Arc::new(rollup),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
