use anyhow::Result;
use std::sync::Arc;

mod config;
mod error;
mod logging;
mod routes;
mod services;
pub mod models;

use services::abstractive::LazySummarizer;
use services::sentiment::{PolarityScorer, VaderScorer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::new()?;
    let addr = config.bind_address();

    // Build our application state
    let state = Arc::new(AppState::new(config));

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// Application state
pub struct AppState {
    config: config::Config,
    summarizer: LazySummarizer,
    scorer: Arc<dyn PolarityScorer>,
}

impl AppState {
    fn new(config: config::Config) -> Self {
        let summarizer = LazySummarizer::from_config(&config);
        Self::with_parts(config, summarizer, Arc::new(VaderScorer::new()))
    }

    fn with_parts(
        config: config::Config,
        summarizer: LazySummarizer,
        scorer: Arc<dyn PolarityScorer>,
    ) -> Self {
        Self { config, summarizer, scorer }
    }
}
