//! Hotel Concierge Server Entry Point

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;

use hotel_concierge_agent::build_resources;
use hotel_concierge_config::load_settings;
use hotel_concierge_server::{create_router, init_metrics, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("HOTEL_CONCIERGE_ENV").ok();
    let config = load_settings(env.as_deref()).context("Failed to load configuration")?;

    init_tracing(&config.observability);

    tracing::info!("Starting Hotel Concierge Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = env.as_deref().unwrap_or("default"),
        auto_train = config.classifier.auto_train,
        "Configuration loaded"
    );

    if init_metrics().is_some() {
        tracing::info!("Initialized Prometheus metrics at /metrics");
    }

    // Training can take a few seconds; keep it off the async workers
    let setup_config = config.clone();
    let resources = tokio::task::spawn_blocking(move || build_resources(&setup_config))
        .await
        .context("Setup task panicked")?
        .context("Failed to initialize chatbot")?;

    let state = AppState::new(config.clone(), Arc::new(resources));
    let cleanup = state.sessions.start_cleanup_task();
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = cleanup.send(true);
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
