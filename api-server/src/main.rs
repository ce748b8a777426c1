//! URL Threat DNA - Prediction Server
//!
//! Serves URL classification and threat DNA scoring over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    URL THREAT DNA                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────────┐  │
//! │  │  API      │──▶│  Dispatch    │──▶│  Classifier     │  │
//! │  │  (Axum)   │   │  (core scan) │   │  ONNX/heuristic │  │
//! │  └───────────┘   └──────┬───────┘   └─────────────────┘  │
//! │                         ▼                                │
//! │              ┌──────────────────────┐                    │
//! │              │ Features + DNA score │                    │
//! │              └──────────────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use urldna_core::logic::model::{load_classifier, Classifier};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "urldna_server=debug,urldna_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("URL Threat DNA server v{} starting...", env!("CARGO_PKG_VERSION"));

    // Build the classifier once; shared read-only by every request
    let classifier = load_classifier(&config.model).context("Failed to load classifier")?;
    tracing::info!(
        "Classifier: {} ({} labels)",
        classifier.method(),
        classifier.labels().len()
    );

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;

    // Build application state
    let state = AppState { classifier };

    // Build router
    let app = create_router(state);

    // Start server
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Human-readable logs in development, JSON lines in production
fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/model", get(handlers::model::status))
        .route("/predict", post(handlers::predict::predict))
        .route("/bulk", post(handlers::bulk::bulk))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
