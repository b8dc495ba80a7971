//! Test server harness for E2E testing
//!
//! Provides TestJwksServer for spawning real JWKS server instances in tests.

use jwks_service::config::Config;
use jwks_service::models::Jwks;
use jwks_service::observability::metrics::init_metrics_recorder;
use jwks_service::routes::{self, AppState};
use jwks_service::services::key_acquisition;
use jwks_service::services::key_store::KeyStore;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the JWKS server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_jwks_e2e() -> Result<()> {
///     let keys = KeyDir::seeded(Environment::Test, TEST_KEY_PKCS1_PEM)?;
///     let server = TestJwksServer::spawn(keys.config(Environment::Test, None)?).await?;
///
///     let response = reqwest::get(format!("{}/jwks/Get", server.url())).await?;
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestJwksServer {
    addr: SocketAddr,
    config: Config,
    key_store: Arc<KeyStore>,
    _handle: JoinHandle<()>,
}

impl TestJwksServer {
    /// Spawn a server that acquires its key exactly as the binary does.
    ///
    /// The server will:
    /// - Run key acquisition for `config.environment`
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn(config: Config) -> Result<Self, anyhow::Error> {
        let key_store = key_acquisition::initialize_key_store(&config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize key store: {}", e))?;

        Self::spawn_with_store(key_store, config).await
    }

    /// Spawn a server around an already populated key store.
    pub async fn spawn_with_store(
        key_store: KeyStore,
        config: Config,
    ) -> Result<Self, anyhow::Error> {
        let key_store = Arc::new(key_store);
        let state = Arc::new(AppState {
            key_store: Arc::clone(&key_store),
            config: config.clone(),
        });

        // The global recorder can only be installed once per test process;
        // later servers get a standalone recorder.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => PrometheusBuilder::new().build_recorder().handle(),
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            key_store,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the key store the server publishes
    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }

    /// Fetch and decode `GET /jwks/Get`
    pub async fn get_jwks(&self) -> Result<Jwks, anyhow::Error> {
        let response = reqwest::get(format!("{}/jwks/Get", self.url()))
            .await?
            .error_for_status()?;
        Ok(response.json::<Jwks>().await?)
    }
}

impl Drop for TestJwksServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
