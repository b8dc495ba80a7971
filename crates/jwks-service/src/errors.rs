use thiserror::Error;

/// Errors raised while acquiring, validating, persisting, or exporting the
/// signing key.
///
/// Every variant is fatal during startup and is never rendered as an HTTP
/// response: the service does not bind until a key is held. Only `Io` and
/// `Validation` raised while reading the key file in development/qa are
/// recovered from, by generating a fresh key.
#[derive(Debug, Error)]
pub enum JwksError {
    /// Missing or invalid environment, missing secret in a live environment,
    /// or a broken key generation primitive.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Key material that does not decode to a usable RSA key.
    #[error("Invalid key: {0}")]
    Validation(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Algorithm outside RS256/RS384/RS512. Reported as not implemented
    /// rather than as misconfiguration.
    #[error("JWT algorithm not implemented: {0}")]
    UnsupportedAlgorithm(String),
}

impl JwksError {
    /// Bounded label for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            JwksError::Configuration(_) => "configuration",
            JwksError::Validation(_) => "validation",
            JwksError::Io { .. } => "io",
            JwksError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
        }
    }
}
