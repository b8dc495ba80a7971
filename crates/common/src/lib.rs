//! Common utilities shared across JWKS service components.

/// Module for secret types that prevent accidental logging
pub mod secret;
