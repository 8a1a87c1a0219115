//! Vitrine - portfolio content server.
//!
//! Self-hosted backend for a personal portfolio site.

use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::{api, config, services, AppState, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::init();
    tracing::info!(
        "Starting Vitrine server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Initialize application state
    let state = AppState::new().await?;
    tracing::info!("Application state initialized");

    // Seed the admin user if configured
    services::bootstrap_admin(&state.db).await?;

    // Initialize startup time for uptime tracking
    api::status::init_startup_time();

    // Build router. The body limit leaves headroom over the image cap
    // for multipart framing.
    let app = Router::new()
        .merge(api::routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.media.max_image_size + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid address");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
