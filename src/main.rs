//! Rugwatch backend entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Construct the identity-store client and upstream clients
//! 3. Build router with permissive CORS (the frontend is served elsewhere)
//! 4. Start Axum server

use rugwatch::{
    auth::middleware::AppState, config::Config, identity::HttpIdentityStore, routes,
    upstream::Upstream,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!(
        "Starting rugwatch on {} (signing domain {})",
        config.bind_addr,
        config.expected_domain
    );

    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; authentication requests will fail");
    }

    let identity = Arc::new(HttpIdentityStore::new(&config));
    let upstream = Arc::new(Upstream::new(&config));

    let bind_addr = config.bind_addr;
    let state = AppState {
        config: Arc::new(config),
        identity,
        upstream,
    };

    // The API is consumed cross-origin by the hosted frontend; allow
    // any origin, method, and header. Preflights are answered by the
    // CORS layer without reaching the handlers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::api_router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
