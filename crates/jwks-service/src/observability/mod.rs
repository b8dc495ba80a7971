//! Observability for the JWKS service.
//!
//! Provides Prometheus metric definitions and the recorder setup used by the
//! composition root.

pub mod metrics;
