use serde::{Deserialize, Serialize};
use std::fmt;

/// JWKS response (RFC 7517)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<JsonWebKey>,
}

/// JSON Web Key (RFC 7517, RSA parameters per RFC 7518 section 6.3)
///
/// Used both for the JWKS wire format and for parsing JWK text supplied as
/// key material. Every member except `kty` is optional so that non-RSA keys
/// (e.g. `"kty": "oct"`) still deserialize and can be rejected explicitly.
///
/// Debug is manually implemented to redact private members.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    pub kty: String, // Key Type ("RSA")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>, // Modulus (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>, // Public exponent (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>, // Key ID
    #[serde(default, rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>, // Symmetric key value ("oct" keys only)
}

impl JsonWebKey {
    /// True if any private or symmetric member is present.
    pub fn has_private_members(&self) -> bool {
        let rsa_private = [&self.d, &self.p, &self.q, &self.dp, &self.dq, &self.qi];
        rsa_private.iter().any(|member| member.is_some()) || self.k.is_some()
    }
}

fn redact(member: &Option<String>) -> Option<&'static str> {
    member.as_ref().map(|_| "[REDACTED]")
}

impl fmt::Debug for JsonWebKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWebKey")
            .field("kty", &self.kty)
            .field("n", &self.n)
            .field("e", &self.e)
            .field("kid", &self.kid)
            .field("use", &self.use_)
            .field("alg", &self.alg)
            .field("d", &redact(&self.d))
            .field("p", &redact(&self.p))
            .field("q", &redact(&self.q))
            .field("dp", &redact(&self.dp))
            .field("dq", &redact(&self.dq))
            .field("qi", &redact(&self.qi))
            .field("k", &redact(&self.k))
            .finish()
    }
}
