use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use estimate_core::file_io;
use estimate_core::StyleCatalog;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    config::{Config, CorsConfig},
    handlers::{self, AppState},
};

/// Start the estimate server
///
/// Loads the catalog once, binds to the configured address and serves until
/// Ctrl-C.
pub async fn start_server(config: Config) -> Result<()> {
    let catalog = load_catalog(&config)?;
    let state = AppState::new(catalog);

    let cors = cors_layer(&config.cors)?;
    let app = create_router(state, cors, config.server.body_limit_bytes);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("invalid server.host '{}'", config.server.host))?,
        config.server.port,
    ));

    info!("Starting Tantya estimate server on {}", addr);
    info!(
        "CORS origins: {}",
        config.cors.allowed_origins.join(", ")
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState, cors: CorsLayer, body_limit: usize) -> Router {
    Router::new()
        .route("/estimate", post(handlers::estimate))
        .route("/estimate/report", post(handlers::estimate_report))
        .route("/generate-model", post(handlers::generate_model))
        .route("/models/:style/:file", get(handlers::get_model))
        .route("/catalog", get(handlers::catalog))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the browser front end
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

fn load_catalog(config: &Config) -> Result<StyleCatalog> {
    match &config.catalog.path {
        Some(path) => {
            let catalog = file_io::load_catalog(path)
                .with_context(|| format!("loading catalog {}", path.display()))?;
            info!("Loaded catalog {} (version {})", path.display(), catalog.version);
            Ok(catalog)
        }
        None => {
            info!("Using embedded reference catalog");
            Ok(StyleCatalog::builtin()?.clone())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}
