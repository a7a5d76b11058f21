use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailbrief::agents::{
    ResearchAgent, ResearchCollaborator, SummarizerAgent, SummarizerCollaborator,
};
use mailbrief::{config::Config, create_router, middleware, models::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailbrief=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // One HTTP client shared by the LLM adapters and search tools
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.search.http_timeout_secs))
        .build()?;

    // Build the collaborators once; they are shared across requests
    let researcher: Arc<dyn ResearchCollaborator> =
        Arc::new(ResearchAgent::from_config(&config, http.clone())?);
    let summarizer: Arc<dyn SummarizerCollaborator> =
        Arc::new(SummarizerAgent::from_config(&config, http)?);

    let state = AppState {
        config: config.clone(),
        researcher,
        summarizer,
    };

    // Create router
    let app = middleware::cors::apply_cors(
        create_router(state),
        &config.server.cors_allowed_origins,
    )
    .layer(tower_http::trace::TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
