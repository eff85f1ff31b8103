use anyhow::Result;

pub mod ai;
pub mod analysis;
pub mod api;
pub mod config;
pub mod messages;
pub mod prompts;
pub mod session;
pub mod system_info;

pub use analysis::{AnalysisOutcome, AnalysisRequest, Analyzer};
pub use api::router;
pub use config::Config;
pub use session::{ResolvedContext, SessionContext, SessionStore};

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Reads .env if present (for local development).
    let config = Config::from_env();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting AutoSage service...");

    let analyzer = match config.ai {
        Some(gemini) => {
            tracing::info!(model = %gemini.model, "Gemini analysis enabled");
            Some(Analyzer::new(ai::GeminiClient::new(gemini)))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; analysis endpoints are disabled");
            None
        }
    };

    let app = api::router(SessionStore::new(), analyzer);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
