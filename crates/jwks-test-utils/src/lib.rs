//! # JWKS Test Utilities
//!
//! Shared test utilities for the JWKS service.
//!
//! This crate provides:
//! - Fixed RSA key fixtures in every accepted encoding
//! - Temporary key directories seeded with a key file
//! - Server test harness (TestJwksServer for E2E tests)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwks_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS1_PEM)?;
//!     let server = TestJwksServer::spawn(keys.config(Environment::Test, None)).await?;
//!
//!     let jwks = server.get_jwks().await?;
//!     assert_eq!(jwks.keys[0].kid.as_deref(), Some(TEST_KEY_KID));
//!     Ok(())
//! }
//! ```

pub mod crypto_fixtures;
pub mod server_harness;

// Re-export commonly used items
pub use crypto_fixtures::*;
pub use server_harness::*;
