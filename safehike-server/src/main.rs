use anyhow::{Context, Result};
use safehike_model::GeminiModel;
use safehike_server::{ServerConfig, create_app};
use safehike_session::InMemorySessionService;
use std::{sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("safehike=info,tower_http=info")),
        )
        .init();

    let api_key = std::env::var("GOOGLE_API_KEY")
        .or_else(|_| std::env::var("GEMINI_API_KEY"))
        .context("GOOGLE_API_KEY or GEMINI_API_KEY must be set")?;
    let model_name =
        std::env::var("SAFEHIKE_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

    let model = Arc::new(GeminiModel::new(api_key, &model_name)?);
    let planner = Arc::new(safehike_agent::build_planner(model));
    let session_service = Arc::new(InMemorySessionService::new());

    let timeout_secs = std::env::var("SAFEHIKE_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60);

    let config = ServerConfig::new(planner, session_service)
        .with_request_timeout(Duration::from_secs(timeout_secs));
    let app = create_app(config);

    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port = port, model = %model_name, "SafeHike server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
