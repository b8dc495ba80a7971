pub mod health;
pub mod jwks_handler;
pub mod metrics;

pub use health::health_check;
pub use jwks_handler::handle_get_jwks;
pub use metrics::metrics_handler;
