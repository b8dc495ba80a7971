use jwks_service::config::Config;
use jwks_service::observability::metrics::init_metrics_recorder;
use jwks_service::routes::{self, AppState};
use jwks_service::services::key_acquisition;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwks_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JWKS service");

    // Metrics recorder must exist before key acquisition records anything
    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics recorder: {}", e);
        e
    })?;

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        environment = %config.environment,
        algorithm = %config.jwt_algorithm,
        "Configuration loaded successfully"
    );

    info!("Acquiring signing key...");
    let key_store = key_acquisition::initialize_key_store(&config).map_err(|e| {
        error!("Failed to acquire signing key: {}", e);
        e
    })?;

    info!(key_count = key_store.len(), "Signing key ready");

    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState {
        key_store: Arc::new(key_store),
        config,
    });

    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("JWKS service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
