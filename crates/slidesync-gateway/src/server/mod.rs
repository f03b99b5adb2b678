//! Gateway server setup
//!
//! Provides the router, middleware stack, and server lifecycle.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use slidesync_common::{AppConfig, AppResult, AppError, CorsConfig};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
        .route("/stats", get(stats))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Live process counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Connections in all broadcast groups, every mode
    pub connections: usize,
    /// Rooms with at least one tracked viewer
    pub rooms: usize,
    /// Viewer entries across all rooms
    pub viewers: usize,
}

/// Stats endpoint
async fn stats(State(state): State<GatewayState>) -> Json<StatsResponse> {
    let (rooms, viewers) = {
        let registry = state.registry().read();
        (registry.room_count(), registry.viewer_count())
    };

    Json(StatsResponse {
        connections: state.connections().connection_count(),
        rooms,
        viewers,
    })
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    let cors = create_cors_layer(
        &state.config().cors,
        state.config().app.env.is_production(),
    );

    create_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Create CORS layer from configuration
///
/// In production only configured origins are allowed; in development any
/// origin is accepted when none are configured.
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if is_production || !config.allowed_origins.is_empty() {
        if config.allowed_origins.is_empty() {
            tracing::warn!(
                "CORS: no allowed origins configured in production mode; \
                 requests from browsers will be blocked"
            );
            base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|origin| {
                    origin.parse::<HeaderValue>().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin: {}", origin);
                        None
                    })
                })
                .collect();

            tracing::info!("CORS: allowing {} configured origins", origins.len());
            base_layer.allow_origin(AllowOrigin::list(origins))
        }
    } else {
        base_layer.allow_origin(Any)
    }
}

/// Run the gateway server on the given address until shutdown
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind to {addr}: {e}")))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| AppError::Server(e.to_string()))?;

    tracing::info!("Gateway listening on ws://{}/gateway", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(format!("Server error: {e}")))?;

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, closing connections");
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.gateway.address();

    let state = GatewayState::new(config);
    let app = create_app(state);

    run_server(app, &addr).await
}
