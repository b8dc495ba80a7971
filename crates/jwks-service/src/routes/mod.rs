//! HTTP routes for the JWKS service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::services::key_store::KeyStore;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Signing keys acquired at startup. Read-only after construction.
    pub key_store: Arc<KeyStore>,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// - `/jwks/Get` - Public JWKS
/// - `/.well-known/jwks.json` - Same document at the RFC 8414 discovery path
/// - `/health` - Liveness check
/// - `/metrics` - Prometheus metrics
/// - TraceLayer for request logging
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let jwks_routes = Router::new()
        .route("/jwks/Get", get(handlers::handle_get_jwks))
        .route("/.well-known/jwks.json", get(handlers::handle_get_jwks))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    // Metrics route carries its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    jwks_routes
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
}
