//! Integration tests for the public JWKS endpoint
//!
//! Each test starts a real server over a temporary key directory and reads
//! the key set back over HTTP.

use jwks_service::crypto::{jwk_thumbprint, parse_rsa_key, Algorithm};
use jwks_service::environment::Environment;
use jwks_service::services::key_store::KeyStore;
use jwks_test_utils::{
    KeyDir, TestJwksServer, TEST_KEY_E, TEST_KEY_KID, TEST_KEY_N, TEST_KEY_PKCS1_PEM,
    TEST_KEY_PKCS8_PEM,
};
use reqwest::StatusCode;

const PRIVATE_MEMBERS: [&str; 6] = ["d", "p", "q", "dp", "dq", "qi"];

/// A test-environment server with the checked-in key publishes exactly that
/// key, identified by its thumbprint.
#[tokio::test]
async fn test_jwks_publishes_seeded_test_key() -> Result<(), anyhow::Error> {
    // Arrange
    let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS1_PEM)?;
    let server = TestJwksServer::spawn(keys.config(Environment::Test, None)?).await?;

    // Act
    let response = reqwest::get(format!("{}/jwks/Get", server.url())).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("max-age=3600")
    );

    let body: serde_json::Value = response.json().await?;
    let published = body["keys"].as_array().cloned().unwrap_or_default();
    assert_eq!(published.len(), 1, "exactly one signing key is published");

    let jwk = &body["keys"][0];
    assert_eq!(jwk["kty"], "RSA");
    assert_eq!(jwk["e"], TEST_KEY_E);
    assert_eq!(jwk["n"], TEST_KEY_N);
    assert_eq!(jwk["kid"], TEST_KEY_KID);

    Ok(())
}

#[tokio::test]
async fn test_jwks_never_exposes_private_members() -> Result<(), anyhow::Error> {
    let keys = KeyDir::empty()?;
    let server = TestJwksServer::spawn(keys.config(Environment::Development, None)?).await?;

    let body: serde_json::Value = reqwest::get(format!("{}/jwks/Get", server.url()))
        .await?
        .json()
        .await?;

    let jwk = body["keys"][0].as_object().cloned().unwrap_or_default();
    assert!(!jwk.is_empty(), "generated key should be published");
    for member in PRIVATE_MEMBERS {
        assert!(!jwk.contains_key(member), "{member} must not be published");
    }
    // Public form is exactly kty, n, e, kid
    let mut names: Vec<&str> = jwk.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["e", "kid", "kty", "n"]);

    Ok(())
}

/// Published kid is the RFC 7638 thumbprint of the published n and e.
#[tokio::test]
async fn test_published_kid_matches_thumbprint() -> Result<(), anyhow::Error> {
    let keys = KeyDir::empty()?;
    let server = TestJwksServer::spawn(keys.config(Environment::Qa, None)?).await?;

    let jwks = server.get_jwks().await?;
    let jwk = jwks.keys.first().ok_or_else(|| anyhow::anyhow!("no keys"))?;

    let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
        anyhow::bail!("published key is missing n or e");
    };
    assert_eq!(jwk.kid.as_deref(), Some(jwk_thumbprint(n, e).as_str()));

    Ok(())
}

#[tokio::test]
async fn test_well_known_path_serves_same_key_set() -> Result<(), anyhow::Error> {
    let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS8_PEM)?;
    let server = TestJwksServer::spawn(keys.config(Environment::Test, None)?).await?;

    let legacy = server.get_jwks().await?;
    let well_known: jwks_service::models::Jwks =
        reqwest::get(format!("{}/.well-known/jwks.json", server.url()))
            .await?
            .error_for_status()?
            .json()
            .await?;

    assert_eq!(legacy, well_known);
    assert_eq!(
        legacy.keys.first().and_then(|k| k.kid.as_deref()),
        Some(TEST_KEY_KID)
    );

    Ok(())
}

/// Repeated requests return the same document; the key set never changes
/// after startup.
#[tokio::test]
async fn test_jwks_is_stable_across_requests() -> Result<(), anyhow::Error> {
    let mut store = KeyStore::new();
    store.add(parse_rsa_key(TEST_KEY_PKCS1_PEM, Algorithm::RS256)?)?;
    let keys = KeyDir::empty()?;
    let server =
        TestJwksServer::spawn_with_store(store, keys.config(Environment::Test, None)?).await?;

    let first = server.get_jwks().await?;
    let second = server.get_jwks().await?;

    assert_eq!(first, second);
    assert_eq!(server.key_store().len(), 1);

    Ok(())
}
