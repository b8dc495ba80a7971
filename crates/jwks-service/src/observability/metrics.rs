//! Metrics definitions for the JWKS service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `jwks_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `strategy`: the three key acquisition strategies
//! - `source`: secret, file, generated, none
//! - acquisition `status`: success or a [`crate::errors::JwksError::category`] value
//!
//! Key identifiers are never used as labels.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus recorder and return the handle for `/metrics`.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        // JWKS is served from memory, so expect sub-millisecond latencies
        .set_buckets_for_metric(
            Matcher::Prefix("jwks_request".to_string()),
            &[0.0005, 0.001, 0.002, 0.005, 0.010, 0.025, 0.050, 0.100],
        )
        .map_err(|e| format!("Failed to set JWKS request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record a served JWKS request.
///
/// Metric: `jwks_requests_total`, `jwks_request_duration_seconds`
///
/// Unlabeled.
pub fn record_jwks_request(duration: Duration) {
    histogram!("jwks_request_duration_seconds").record(duration.as_secs_f64());

    counter!("jwks_requests_total").increment(1);
}

/// Record the outcome of startup key acquisition.
///
/// Metric: `jwks_key_acquisition_total`
/// Labels: `strategy`, `source`, `status`
pub fn record_key_acquisition(strategy: &str, source: &str, status: &str) {
    counter!("jwks_key_acquisition_total",
        "strategy" => strategy.to_string(),
        "source" => source.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Set the number of signing keys published in the JWKS.
///
/// Metric: `jwks_active_signing_keys`
#[allow(clippy::cast_precision_loss)]
pub fn set_active_signing_keys(count: u64) {
    gauge!("jwks_active_signing_keys").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    // These run against the global no-op recorder; they exercise the label
    // construction without asserting on recorded values.

    #[test]
    fn test_record_jwks_request() {
        record_jwks_request(Duration::from_micros(300));
        record_jwks_request(Duration::from_millis(2));
    }

    #[test]
    fn test_jwks_request_counter_is_unlabeled() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_jwks_request(Duration::from_micros(300));
        });

        let rendered = handle.render();
        assert!(rendered.contains("jwks_requests_total 1"), "{rendered}");
        assert!(!rendered.contains("jwks_requests_total{"), "{rendered}");
    }

    #[test]
    fn test_record_key_acquisition() {
        record_key_acquisition("from_secret", "secret", "success");
        record_key_acquisition("read_or_generate_file", "generated", "success");
        record_key_acquisition("read_only_file", "none", "io");
        record_key_acquisition("from_secret", "none", "configuration");
    }

    #[test]
    fn test_set_active_signing_keys() {
        set_active_signing_keys(0);
        set_active_signing_keys(1);
    }
}
