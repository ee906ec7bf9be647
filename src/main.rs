//! FitBot - fitness chat backend
//!
//! A Rust backend that relays chat messages to an LLM completion API,
//! keeping a rolling per-session conversation window.

mod api;
mod chat;
mod llm;
mod system_prompt;

use api::{create_router, AppState};
use chat::ChatGateway;
use llm::{CompletionService, LlmConfig};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitbot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("FITBOT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // Initialize the completion service. A missing key is not fatal:
    // the server starts and completions fail in-band until it is set.
    let llm_config = LlmConfig::from_env();
    if !llm_config.has_api_key() {
        tracing::warn!("No OpenAI API key configured. Set OPENAI_API_KEY.");
    }
    let service = llm::build_service(&llm_config);
    tracing::info!(model = %service.model_id(), "Completion service initialized");

    // Create application state
    let state = AppState::new(ChatGateway::new(service));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("FitBot server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
