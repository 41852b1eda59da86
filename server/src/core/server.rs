//! Server Implementation
//!
//! Router assembly, middleware layers, HTTP listener and graceful
//! shutdown.

use axum::{Router, middleware};
use http::HeaderValue;
use shared::error::AppError;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::require_auth;
use crate::core::{BackgroundTasks, Config, ServerState};
use crate::services::health_probe;

/// HTTP request logging middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);
    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::employees::router())
        .merge(crate::api::attendance::router())
}

/// Attach state and middleware layers to the assembled routes
///
/// Shared between [`Server::run`] and the integration tests.
pub fn build_router(state: ServerState) -> Router {
    let cors_origin = state.config.cors_origin.clone();
    build_app()
        // Router-level guard; require_auth skips the public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(cors_layer(&cors_origin))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(origin = %origin, "Invalid CORS_ORIGIN, falling back to permissive");
            CorsLayer::permissive()
        }
    }
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server over an already-initialized state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let app = build_router(self.state.clone());

        let mut tasks = BackgroundTasks::new();
        let probe_port = self.config.server_port;
        let probe_token = tasks.shutdown_token();
        tasks.spawn("health_probe", async move {
            health_probe::run(probe_port, probe_token).await;
        });

        let addr = format!("{}:{}", self.config.server_host, self.config.server_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        tracing::info!("HRMS server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tasks.shutdown().await;
        Ok(())
    }
}
