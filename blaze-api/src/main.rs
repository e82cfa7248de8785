//! Blaze API
//!
//! HTTP front of the Blaze code runner. Accepts run requests from the
//! platform, drives them through the Judge0 poller and answers with the
//! platform's JSON envelope.

use std::sync::Arc;

use anyhow::Context;
use blaze_runner::{CancellationToken, JobPoller};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "blaze_api=debug,blaze_runner=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Blaze API...");

    let server = ServerConfig::from_env();
    server.validate()?;

    let runner_config = blaze_runner::Config::from_env()?;
    if runner_config.api_key.is_none() {
        tracing::warn!("JUDGE0_API_KEY is not set; submissions will be sent unauthenticated");
    }
    tracing::info!(
        "Execution service: {} (max_attempts={}, poll_interval={:?})",
        runner_config.base_url,
        runner_config.max_attempts,
        runner_config.poll_interval
    );

    let poller = JobPoller::from_config(runner_config).context("Failed to create job poller")?;

    let shutdown = CancellationToken::new();
    let state = api::AppState::new(Arc::new(poller), shutdown.clone());

    // Build router with all API endpoints
    let app = api::create_router(state, server.cors_layer()?);

    tracing::info!("Listening on {}", server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", server.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM, cancelling in-flight runs
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, cancelling in-flight runs");
    shutdown.cancel();
}
