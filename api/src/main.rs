use anyhow::Result;
use pdf_assistant_api::{build_app, AppState, ServerConfig};
use pdf_qa::{GeminiConfig, GeminiService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::from_env();
    let gemini = match GeminiConfig::from_env() {
        Ok(gemini) => gemini,
        Err(e) => {
            eprintln!("Failed to configure generator: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(Arc::new(GeminiService::new(gemini)));
    let app = build_app(state, &config.static_dir, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    log::info!("Serving static files from {}", config.static_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}
