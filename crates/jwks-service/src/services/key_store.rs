use crate::crypto::{self, KeyMaterial};
use crate::errors::JwksError;
use crate::models::Jwks;

/// In-memory set of validated RSA signing keys, in insertion order.
///
/// Populated once during startup and shared read-only afterward. Only keys
/// that pass [`crypto::is_rsa`] are accepted.
#[derive(Debug, Default)]
pub struct KeyStore {
    keys: Vec<KeyMaterial>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key. A key whose `kid` is already present replaces the existing
    /// entry in place.
    pub fn add(&mut self, key: KeyMaterial) -> Result<(), JwksError> {
        if !crypto::is_rsa(&key) {
            return Err(JwksError::Validation(format!(
                "Only RSA keys can be added to the key store, found kty {:?}",
                key.kty
            )));
        }

        match self
            .keys
            .iter_mut()
            .find(|existing| existing.kid == key.kid)
        {
            Some(existing) => *existing = key,
            None => self.keys.push(key),
        }
        Ok(())
    }

    /// Export the key set.
    ///
    /// Public callers must pass `include_private = false`; the public form
    /// carries only `kty`, `n`, `e` and `kid`.
    pub fn export_jwks(&self, include_private: bool) -> Jwks {
        let keys = self
            .keys
            .iter()
            .map(|key| {
                if include_private {
                    crypto::to_private_jwk(key)
                } else {
                    crypto::to_public_jwk(key)
                }
            })
            .collect();

        Jwks { keys }
    }

    pub fn get(&self, kid: &str) -> Option<&KeyMaterial> {
        self.keys.iter().find(|key| key.kid == kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
