pub mod form;
pub mod handlers;
pub mod page;
pub mod types;

use crate::{Result, config::Config, llm::GeminiClient, summarizer::Summarizer};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use handlers::AppState;

/// Upper bound on a form submission, uploads included.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/summarize", post(handlers::summarize_form))
        .route("/download", post(handlers::download))
        .route("/api/summarize", post(handlers::summarize_api))
        .route("/api/model", get(handlers::model_info))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Requests still get a rendered configuration error; the server stays up
    if let Err(e) = config.llm.credentials() {
        warn!("{}", e);
    }

    let client = GeminiClient::new(config.llm.clone())?;
    let summarizer = Summarizer::new(
        Arc::new(client),
        config.llm.temperature,
        config.llm.max_tokens,
    );

    let app_state = AppState {
        summarizer: Arc::new(summarizer),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} with model {}",
        addr, config.llm.model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
