use crate::models::Jwks;
use crate::observability::metrics::record_jwks_request;
use crate::routes::AppState;
use axum::{
    extract::State,
    http::header::{HeaderMap, HeaderValue, CACHE_CONTROL},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle JWKS request
///
/// GET /jwks/Get and GET /.well-known/jwks.json
///
/// Returns the public form of every key in the store (RFC 7517), with
/// Cache-Control set to max-age=3600. Private members are never included.
#[instrument(name = "jwks.get", skip_all, fields(key_count))]
pub async fn handle_get_jwks(State(state): State<Arc<AppState>>) -> (HeaderMap, Json<Jwks>) {
    let start = Instant::now();

    let jwks = state.key_store.export_jwks(false);
    tracing::Span::current().record("key_count", jwks.keys.len());

    record_jwks_request(start.elapsed());

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=3600"));

    (headers, Json(jwks))
}
