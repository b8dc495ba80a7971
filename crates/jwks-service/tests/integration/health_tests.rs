//! Integration tests for the operational endpoints

use jwks_service::environment::Environment;
use jwks_test_utils::{KeyDir, TestJwksServer, TEST_KEY_PKCS1_PEM};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_endpoint_returns_ok() -> Result<(), anyhow::Error> {
    let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS1_PEM)?;
    let server = TestJwksServer::spawn(keys.config(Environment::Test, None)?).await?;

    let response = reqwest::get(format!("{}/health", server.url())).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_is_served() -> Result<(), anyhow::Error> {
    let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS1_PEM)?;
    let server = TestJwksServer::spawn(keys.config(Environment::Test, None)?).await?;

    let response = reqwest::get(format!("{}/metrics", server.url())).await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
