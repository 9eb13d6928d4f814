use std::sync::Arc;

use anyhow::{Context, Result};
use llm_qa::answer::AnswerService;
use llm_qa::config::{Config, ServerConfig};
use llm_qa::llm::APIClient;
use llm_qa::web::{self, AppState};
use log::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let server = ServerConfig::from_env()?;

    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY environment variable not set.");
        warn!("Users will need to provide their API key through the web interface.");
    }

    let client = APIClient::new(&config)?;
    info!("using model {}", client.model());

    let state = Arc::new(AppState {
        answers: AnswerService::new(Arc::new(client)),
        default_api_key: config.api_key.clone(),
    });
    let app = web::router(state);

    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;
    info!("http server shutdown completed");

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(e) => {
                warn!("failed to install SIGTERM handler ({}); falling back to ctrl-c only", e);
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("failed to await ctrl-c: {}", e);
                }
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("received ctrl-c; shutting down"),
            _ = terminate.recv() => info!("received SIGTERM; shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to await ctrl-c: {}", e);
        }
    }
}
