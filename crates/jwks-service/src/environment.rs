//! Deployment environments and the key acquisition strategy each one uses.
//!
//! `resolve_strategy` is the only place that decides where a signing key comes
//! from. It is a total `match` over [`Environment`]: adding a variant without
//! mapping it is a compile error.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deployment environment, parsed from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Production,
    Qa,
    Staging,
    Test,
}

impl Environment {
    /// Canonical name. Also the stem of the default key file
    /// (`keys/<name>.pem`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Qa => "qa",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }

    /// Live environments serve real traffic and must never generate or
    /// persist signing keys.
    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Production | Environment::Staging)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized environment name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid application environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "qa" => Ok(Environment::Qa),
            "staging" | "stage" => Ok(Environment::Staging),
            "test" => Ok(Environment::Test),
            other => Err(UnknownEnvironment(other.to_string())),
        }
    }
}

/// Where the signing key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Secret material supplied in-process (`JWT_KEY`). No file access.
    FromSecret,
    /// Read the key file; generate and persist a new key if that fails.
    ReadOrGenerateFile,
    /// Read the key file; any failure is fatal.
    ReadOnlyFile,
}

impl KeyStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStrategy::FromSecret => "from_secret",
            KeyStrategy::ReadOrGenerateFile => "read_or_generate_file",
            KeyStrategy::ReadOnlyFile => "read_only_file",
        }
    }
}

/// Map an environment to its key acquisition strategy.
pub fn resolve_strategy(env: Environment) -> KeyStrategy {
    match env {
        Environment::Production | Environment::Staging => KeyStrategy::FromSecret,
        Environment::Development | Environment::Qa => KeyStrategy::ReadOrGenerateFile,
        Environment::Test => KeyStrategy::ReadOnlyFile,
    }
}
