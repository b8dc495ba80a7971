//! Fixed RSA key fixtures for testing
//!
//! Every fixture encodes the same 2048-bit RSA key, except the EC key which
//! exists to exercise rejection of non-RSA material.

use common::secret::SecretString;
use jwks_service::config::{Config, KeyFilePath, DEFAULT_JWT_ALGORITHM};
use jwks_service::environment::Environment;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use thiserror::Error;

/// PKCS#1 (`BEGIN RSA PRIVATE KEY`) encoding of the test key.
pub const TEST_KEY_PKCS1_PEM: &str = include_str!("../fixtures/rsa_pkcs1.pem");

/// PKCS#8 (`BEGIN PRIVATE KEY`) encoding of the test key.
pub const TEST_KEY_PKCS8_PEM: &str = include_str!("../fixtures/rsa_pkcs8.pem");

/// Private JWK encoding of the test key, without `kid` or `alg`.
pub const TEST_KEY_PRIVATE_JWK: &str = include_str!("../fixtures/rsa_private_jwk.json");

/// SubjectPublicKeyInfo encoding of the test key's public half.
pub const TEST_KEY_PUBLIC_PEM: &str = include_str!("../fixtures/rsa_public.pem");

/// A P-256 private key, for negative tests.
pub const EC_P256_PKCS8_PEM: &str = include_str!("../fixtures/ec_p256_pkcs8.pem");

/// RFC 7638 thumbprint of the test key.
pub const TEST_KEY_KID: &str = "bcli9sQbh2TzATBYX1weEUy6bpCPEzHU61OliGVK-oA";

/// Public exponent of the test key (65537).
pub const TEST_KEY_E: &str = "AQAB";

/// Modulus of the test key, base64url without padding.
pub const TEST_KEY_N: &str = "vxpWWl5uKO3unO396I6jUeG98HFoEo8Iwp7OrxR-qBK9nxu44dOPxNpUn60a3u9iZy3biyhFF-1dNkOqArPHKoLEWPLU4yF8z6e_MpPAPhiu4hNcMlOPvC8vHIVPFXn9-iJoFujA-RDWgoNv7WtYz6AI2dv92-3AHB8I7I9TAnt8RCFLAGRuMc7m7h7n_Ms-u72KLGzBXfpL4z5GkZ8Mv6u4zN43FQh6n3QSGjElU6nIwbDW7XIQFNDwZ1NNY6AClc2ydVLq5ChBgrIWyjffTmKFzur_9RAj3ldaH8k0IbuMGd3IT1l_QGzgO5RX_Cy712aqI4yhADX8PSKNhz5bBw";

/// Test fixture error type
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Fixture I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixture path rejected: {0}")]
    Path(String),
}

/// A temporary root directory standing in for the working directory.
///
/// Key files live at `<root>/keys/<environment>.pem`, the default location.
/// The directory is removed on drop.
pub struct KeyDir {
    root: TempDir,
}

impl KeyDir {
    /// Create an empty root with no key files.
    pub fn empty() -> Result<Self, FixtureError> {
        Ok(Self {
            root: TempDir::new()?,
        })
    }

    /// Create a root whose key file for `env` contains `contents`.
    ///
    /// # Example
    /// ```rust,ignore
    /// let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS1_PEM)?;
    /// assert!(keys.key_path(Environment::Test)?.as_path().exists());
    /// ```
    pub fn seeded(env: Environment, contents: &str) -> Result<Self, FixtureError> {
        let dir = Self::empty()?;
        dir.write_key_file(env, contents)?;
        Ok(dir)
    }

    /// Overwrite the key file for `env`.
    pub fn write_key_file(&self, env: Environment, contents: &str) -> Result<(), FixtureError> {
        let path = self.key_path(env)?;
        if let Some(parent) = path.as_path().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_path(), contents)?;
        Ok(())
    }

    /// Read the key file for `env`, if present.
    pub fn read_key_file(&self, env: Environment) -> Result<Option<String>, FixtureError> {
        let path = self.key_path(env)?;
        if !path.as_path().exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path.as_path())?))
    }

    /// Default key file path for `env` under this root.
    pub fn key_path(&self, env: Environment) -> Result<KeyFilePath, FixtureError> {
        KeyFilePath::for_environment(self.root.path(), env)
            .map_err(|e| FixtureError::Path(e.to_string()))
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Build a service configuration rooted here, as `Config::from_env`
    /// would with `PWD` pointing at this directory.
    pub fn config(&self, env: Environment, jwt_key: Option<&str>) -> Result<Config, FixtureError> {
        Ok(Config {
            environment: env,
            jwt_key: jwt_key.map(SecretString::from),
            jwt_algorithm: DEFAULT_JWT_ALGORITHM.to_string(),
            key_file_path: self.key_path(env)?,
            bind_address: "127.0.0.1:0".to_string(),
        })
    }
}
