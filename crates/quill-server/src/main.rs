//! HTTP server entry point and Axum router setup.
//!
//! Reads the relay configuration, builds the Gemini client, configures routes
//! and starts the Axum server (127.0.0.1:8000 by default).

mod dto;
mod error;
mod handlers;
mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use quill_config::RelayConfig;
use quill_llm::{GeminiClient, TextGenerator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub generator: Arc<dyn TextGenerator>,
    pub default_model: String,
}

impl ServerState {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &RelayConfig) -> Self {
        Self {
            generator,
            default_model: config.default_model.clone(),
        }
    }

    /// Returns the requested model, falling back to the configured default.
    pub fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_model)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = RelayConfig::from_env().context("failed to read configuration")?;
    if !config.has_api_key() {
        warn!("GEMINI_API_KEY is not set; /api/ai requests will fail until it is provided");
    }
    info!("Default model: {}", config.default_model);

    let generator = GeminiClient::new(config.api_key.clone(), &config.api_base);
    let state = Arc::new(ServerState::new(Arc::new(generator), &config));
    let app = build_router(state);

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router with CORS and request tracing.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/api/ai", post(handlers::ai::ai_edit))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
