//! Signing key acquisition.
//!
//! Produces exactly one validated RSA key at startup, following the strategy
//! that [`resolve_strategy`] assigns to the deployment environment.

use crate::config::{Config, KeyFilePath};
use crate::crypto::{self, Algorithm, KeyMaterial};
use crate::environment::{resolve_strategy, Environment, KeyStrategy};
use crate::errors::JwksError;
use crate::observability::metrics::{record_key_acquisition, set_active_signing_keys};
use crate::repositories::key_files;
use crate::services::key_store::KeyStore;
use common::secret::{ExposeSecret, SecretString};
use tracing::instrument;

/// Where an acquired key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Secret,
    File,
    Generated,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Secret => "secret",
            KeySource::File => "file",
            KeySource::Generated => "generated",
        }
    }
}

/// Acquire the signing key for `env`.
///
/// - Production/staging: parse `secret`; absent secret is a configuration
///   error and a malformed one is a validation error. Files are never touched.
/// - Development/qa: read `path`; if that fails for any reason, generate a
///   new key and persist it to `path`.
/// - Test: read `path`; failures propagate.
#[instrument(
    skip_all,
    fields(env = %env, alg = %algorithm, path = %path, strategy = tracing::field::Empty)
)]
pub fn acquire(
    env: Environment,
    secret: Option<&SecretString>,
    path: &KeyFilePath,
    algorithm: Algorithm,
) -> Result<KeyMaterial, JwksError> {
    let strategy = resolve_strategy(env);
    tracing::Span::current().record("strategy", strategy.as_str());

    let result = match strategy {
        KeyStrategy::FromSecret => {
            from_secret(secret, algorithm).map(|key| (key, KeySource::Secret))
        }
        KeyStrategy::ReadOrGenerateFile => read_or_generate(path, algorithm),
        KeyStrategy::ReadOnlyFile => {
            read_key_file(path, algorithm).map(|key| (key, KeySource::File))
        }
    };

    match result {
        Ok((key, source)) => {
            record_key_acquisition(strategy.as_str(), source.as_str(), "success");
            tracing::info!(
                target: "key_acquisition",
                kid = %key.kid,
                source = source.as_str(),
                "Signing key acquired"
            );
            Ok(key)
        }
        Err(e) => {
            record_key_acquisition(strategy.as_str(), "none", e.category());
            tracing::error!(
                target: "key_acquisition",
                error = %e,
                "Signing key acquisition failed"
            );
            Err(e)
        }
    }
}

/// Build the process key store from configuration.
///
/// Called once by the composition root before any request is served. Any
/// error means the service must not start.
pub fn initialize_key_store(config: &Config) -> Result<KeyStore, JwksError> {
    let algorithm: Algorithm = config.jwt_algorithm.parse()?;

    let key = acquire(
        config.environment,
        config.jwt_key.as_ref(),
        &config.key_file_path,
        algorithm,
    )?;

    let mut store = KeyStore::new();
    store.add(key)?;
    set_active_signing_keys(store.len() as u64);

    Ok(store)
}

fn from_secret(
    secret: Option<&SecretString>,
    algorithm: Algorithm,
) -> Result<KeyMaterial, JwksError> {
    let secret = secret
        .filter(|s| !s.expose_secret().trim().is_empty())
        .ok_or_else(|| JwksError::Configuration("JWT_KEY is not defined".to_string()))?;

    crypto::parse_rsa_key(secret.expose_secret(), algorithm).map_err(|e| match e {
        JwksError::Validation(reason) => {
            JwksError::Validation(format!("Invalid RSA private key in JWT_KEY: {}", reason))
        }
        other => other,
    })
}

fn read_key_file(path: &KeyFilePath, algorithm: Algorithm) -> Result<KeyMaterial, JwksError> {
    let pem = key_files::read(path)?;
    crypto::parse_rsa_key(&pem, algorithm).map_err(|e| match e {
        JwksError::Validation(reason) => JwksError::Validation(format!(
            "Invalid RSA private key retrieved from {}: {}",
            path, reason
        )),
        other => other,
    })
}

fn read_or_generate(
    path: &KeyFilePath,
    algorithm: Algorithm,
) -> Result<(KeyMaterial, KeySource), JwksError> {
    match read_key_file(path, algorithm) {
        Ok(key) => Ok((key, KeySource::File)),
        Err(e) => {
            tracing::warn!(
                target: "key_acquisition",
                error = %e,
                "Key file unavailable, generating a new signing key"
            );

            let key = crypto::generate_rsa_key(algorithm)?;
            if !crypto::is_rsa(&key) {
                return Err(JwksError::Configuration(
                    "Generated RSA key is invalid".to_string(),
                ));
            }

            key_files::save(path, &key)?;
            Ok((key, KeySource::Generated))
        }
    }
}
