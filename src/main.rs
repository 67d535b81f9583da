//! Joke Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use joke_service::api::{self, AppState};
use joke_service::bot::memory::JokeMemory;
use joke_service::bot::telegram::TelegramBot;
use joke_service::config::AppConfig;
use joke_service::jokes::{JokeService, WeightsConfig};
use joke_service::metrics::Metrics;
use joke_service::translate::Translator;

/// Structured JSON logs to stdout, filterable via RUST_LOG (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env();
    let metrics = Metrics::init();

    let weights = match &config.weights_path {
        Some(path) => WeightsConfig::load_from_file(path),
        None => WeightsConfig::default_seed(),
    };

    let bot = config
        .telegram_token
        .clone()
        .map(|token| Arc::new(TelegramBot::new(token)));
    if bot.is_none() {
        info!("TELEGRAM_BOT_TOKEN not set; telegram webhook disabled");
    }

    let state = AppState {
        jokes: Arc::new(JokeService::with_weights(&weights, config.fetch_timeout)),
        translator: Arc::new(Translator::new()),
        bot,
        memory: JokeMemory::new(),
    };

    let app = api::router(state, &config).merge(metrics.router());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.context("binding http listener")?;
    info!(port = config.port, "joke service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("installing ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("installing sigterm handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
