mod config;
mod db;
mod errors;
mod extraction;
mod extractors;
mod generation;
mod llm_client;
mod prompts;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumio API v{} ({})", env!("CARGO_PKG_VERSION"), config.env);

    // PostgreSQL is optional and only backs the health check
    let db = match config.database_url.as_deref() {
        Some(url) => match create_pool(url).await {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("PostgreSQL unavailable, continuing without it: {e}");
                None
            }
        },
        None => {
            info!("DATABASE_URL not set, running without PostgreSQL");
            None
        }
    };

    let gemini = GeminiClient::from_config(&config)?;
    if gemini.is_configured() {
        info!("Gemini client initialized (model: {})", gemini.model());
    } else {
        warn!("GEMINI_API_KEY not set; generation endpoints will answer 503");
    }

    let state = AppState::new(config, db.clone(), Arc::new(gemini));
    info!(
        "Prompt builder ready (resume budget: {} chars)",
        state.prompts.resume_char_budget()
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", state.config.port).parse()?;
    let app = build_router(state).layer(TraceLayer::new_for_http());

    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = db {
        pool.close().await;
    }
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
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
