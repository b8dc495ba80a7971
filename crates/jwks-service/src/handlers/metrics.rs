//! Prometheus metrics endpoint handler.
//!
//! The endpoint is unauthenticated. Metrics carry no key material and no key
//! identifiers.

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handler for GET /metrics
///
/// Returns Prometheus text format:
/// ```text
/// # TYPE jwks_requests_total counter
/// jwks_requests_total 42
/// ```
#[tracing::instrument(skip_all, name = "jwks.metrics.scrape")]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
