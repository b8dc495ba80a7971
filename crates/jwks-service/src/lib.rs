//! JWKS Service Library
//!
//! Acquires the process-wide RSA signing key for the current deployment
//! environment and publishes its public half as a JSON Web Key Set.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - RSA key parsing, generation and JWK/PEM encoding
//! - `environment` - Deployment environments and key acquisition strategies
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - JWK and JWKS documents
//! - `observability` - Prometheus metrics
//! - `repositories` - Key file persistence
//! - `routes` - Router and application state
//! - `services` - Key store and key acquisition

pub mod config;
pub mod crypto;
pub mod environment;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
