//! cfwatch - Application Entry Point
//!
//! Watches the configured handle in the configured contest until the rating
//! change is out, the contest ends without one, or the process is stopped.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cfwatch::{
    api::{CodeforcesClient, Fetchers},
    config::Config,
    listeners::{LiveView, NotificationRenderer, PhaseState},
    services::MonitorRegistry,
    EventListener,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let handle = config.watch.handle.clone();
    let contest_id = config.watch.contest_id;

    tracing::info!("Starting cfwatch for {} in contest {}", handle, contest_id);

    let client = Arc::new(CodeforcesClient::new(&config.api)?);
    tracing::info!("Contest page: {}", client.contest_url(contest_id));

    let (live_view, mut view_rx) = LiveView::new();
    let listeners: Vec<Box<dyn EventListener>> = vec![
        Box::new(NotificationRenderer::new(handle.clone())),
        Box::new(live_view),
    ];

    let mut registry = MonitorRegistry::new(Fetchers::from_client(client), config.schedule.clone());
    registry.start(&handle, contest_id, listeners).await;

    // Trace the published view
    tokio::spawn(async move {
        while view_rx.changed().await.is_ok() {
            let view = view_rx.borrow_and_update().clone();
            if let PhaseState::Coding { ends_at: Some(ends_at) } = view.phase_state {
                tracing::debug!(%ends_at, rank = ?view.rank, "View updated");
            } else {
                tracing::debug!(phase = %view.phase, rank = ?view.rank, "View updated");
            }
        }
    });

    tokio::select! {
        outcome = registry.wait(&handle) => {
            if let Some(outcome) = outcome {
                tracing::info!("Monitor finished: {}", outcome);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
    }

    for (handle, outcome) in registry.stop_all().await {
        tracing::info!("Monitor for {} stopped: {}", handle, outcome);
    }

    tracing::info!("cfwatch stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
