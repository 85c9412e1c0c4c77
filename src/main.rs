//! Post Gateway - blog post API with a resilient access layer
//!
//! Starts the HTTP server, the cache sweep task and the event notifier.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use post_gateway::api::create_router;
use post_gateway::events::{AnalyticsObserver, NotificationObserver, Observer, SearchIndexObserver};
use post_gateway::{spawn_notifier, spawn_sweep_task, AppState, Config};

/// Time allowed for queued events to reach observers after the server stops.
const NOTIFIER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Main entry point for the post gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Start the event notifier with the built-in observers
/// 4. Build the cached store and guarded search
/// 5. Start the cache sweep task if enabled
/// 6. Serve HTTP until SIGINT/SIGTERM, then drain pending events
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Post Gateway");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_max_entries={}, cache_ttl={}s, port={}, breaker_max_failures={}, breaker_reset_timeout={}s",
        config.cache_max_entries,
        config.cache_ttl,
        config.server_port,
        config.breaker_max_failures,
        config.breaker_reset_timeout
    );

    let observers: Vec<Arc<dyn Observer>> = vec![
        Arc::new(SearchIndexObserver),
        Arc::new(NotificationObserver),
        Arc::new(AnalyticsObserver),
    ];
    let (notifier, notifier_handle) = spawn_notifier(observers, config.event_queue_capacity);

    let state = AppState::from_config(&config, notifier);
    info!("Caching proxy enabled: max {} posts, {}s TTL", config.cache_max_entries, config.cache_ttl);

    let sweep_handle = config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(state.posts.clone(), interval));

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // The router owns the last notifier handle; serving to completion drops it
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    match tokio::time::timeout(NOTIFIER_DRAIN_TIMEOUT, notifier_handle).await {
        Ok(Ok(delivered)) => info!("Event notifier delivered {} events", delivered),
        Ok(Err(err)) => warn!("Event notifier task failed: {}", err),
        Err(_) => warn!("Event notifier did not drain within {:?}", NOTIFIER_DRAIN_TIMEOUT),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Cache sweep task aborted");
    }
}
