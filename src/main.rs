//! Odds GPT Backend
//!
//! HTTP proxy in front of a sports-odds provider that keeps the provider key server-side

use anyhow::{Context, Result};
use odds_gpt_backend::config::settings::LoggingConfig;
use odds_gpt_backend::{create_router, Settings};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment (.env included)
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", odds_gpt_backend::version_info());

    if settings.upstream.api_key.is_none() {
        warn!("ODDS_API_KEY is not set, proxy routes will answer 500");
    }
    if !settings.auth_enabled() {
        warn!("LOCAL_API_KEY is not set, /api routes are open to any caller");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let app = create_router(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Odds proxy server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("📄 API description: http://{}/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging system
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
