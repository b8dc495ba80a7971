use crate::environment::{Environment, UnknownEnvironment};
use crate::errors::JwksError;
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default HTTP listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Default JWT signing algorithm
pub const DEFAULT_JWT_ALGORITHM: &str = "RS256";

/// Directory, relative to the root, holding per-environment key files
pub const KEY_DIRECTORY: &str = "keys";

const KEY_FILE_EXTENSION: &str = ".pem";

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    /// Secret key material (PEM or JWK JSON). Required in live environments.
    pub jwt_key: Option<SecretString>,
    /// Raw `JWT_ALGORITHM` value; validated when the key store is initialized
    /// so an unsupported algorithm reports as not implemented.
    pub jwt_algorithm: String,
    pub key_file_path: KeyFilePath,
    pub bind_address: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error(transparent)]
    InvalidEnvironment(#[from] UnknownEnvironment),

    #[error("Invalid key file path: {0}")]
    InvalidKeyFilePath(String),
}

impl From<ConfigError> for JwksError {
    fn from(err: ConfigError) -> Self {
        JwksError::Configuration(err.to_string())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment: Environment = vars
            .get("NODE_ENV")
            .ok_or_else(|| ConfigError::MissingEnvVar("NODE_ENV".to_string()))?
            .parse()?;

        // An empty JWT_KEY is treated as unset
        let jwt_key = vars
            .get("JWT_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::from(key.as_str()));

        let jwt_algorithm = vars
            .get("JWT_ALGORITHM")
            .cloned()
            .unwrap_or_else(|| DEFAULT_JWT_ALGORITHM.to_string());

        let key_file_path = match vars.get("JWT_KEY_FILE_PATH") {
            Some(custom) => KeyFilePath::new(custom)?,
            None => {
                let root = vars.get("PWD").map(String::as_str).unwrap_or(".");
                KeyFilePath::for_environment(root, environment)?
            }
        };

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Config {
            environment,
            jwt_key,
            jwt_algorithm,
            key_file_path,
            bind_address,
        })
    }
}

/// A validated path to a `.pem` key file.
///
/// The file name must be `<stem>.pem` with a non-empty stem of ASCII
/// alphanumerics, `-` or `_`. Directory components must be non-empty and made
/// of ASCII alphanumerics, `-`, `_`, `+` or `.` (which covers `.` and `..`).
/// Both relative and absolute paths are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFilePath(PathBuf);

impl KeyFilePath {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = path.to_str().ok_or_else(|| {
            ConfigError::InvalidKeyFilePath(format!("{} is not valid UTF-8", path.display()))
        })?;

        if !is_key_file_path(text) {
            return Err(ConfigError::InvalidKeyFilePath(text.to_string()));
        }

        Ok(Self(path.to_path_buf()))
    }

    /// Default location for an environment: `<root>/keys/<environment>.pem`
    pub fn for_environment(root: impl AsRef<Path>, env: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("{}{}", env.as_str(), KEY_FILE_EXTENSION);
        Self::new(root.as_ref().join(KEY_DIRECTORY).join(file_name))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for KeyFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

fn is_key_file_path(path: &str) -> bool {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let mut components: Vec<&str> = relative.split('/').collect();

    let Some(file_name) = components.pop() else {
        return false;
    };
    let Some(stem) = file_name.strip_suffix(KEY_FILE_EXTENSION) else {
        return false;
    };

    let stem_ok = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let directories_ok = components.iter().all(|dir| is_directory_name(dir));

    stem_ok && directories_ok
}

fn is_directory_name(dir: &str) -> bool {
    !dir.is_empty() && dir.chars().all(is_directory_char)
}

fn is_directory_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}
