//! Cached Collection - a JSON collection server with a TTL response cache
//!
//! Serves CRUD operations on a single JSON file, with an in-memory cache in
//! front of reads.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cached_collection::api::create_router;
use cached_collection::store::JsonFileStore;
use cached_collection::{spawn_sweep_task, AppState, Config};

/// Main entry point for the collection server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Make sure the data file exists
/// 4. Create the response cache and start the expiry sweep
/// 5. Serve the router until SIGINT/SIGTERM, then flush the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cached_collection=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting collection server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: data_file={}, default_ttl={}s, response_ttl={}s, check_period={}s, port={}, consistency={}",
        config.data_file.display(),
        config.default_ttl,
        config.response_ttl,
        config.check_period,
        config.server_port,
        config.consistency
    );

    JsonFileStore::new(config.data_file.clone())
        .ensure_exists()
        .await
        .with_context(|| format!("preparing data file {}", config.data_file.display()))?;

    let state = AppState::from_config(&config);
    let cache = state.cache.clone();

    let sweep_handle = spawn_sweep_task(cache.clone(), config.check_period);
    info!("Background expiry sweep started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server running on port {}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("serving HTTP")?;

    let dropped = cache.write().await.flush_all();
    info!("Server shutdown complete, {} cache entries released", dropped);
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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

    sweep_handle.abort();
    warn!("Expiry sweep aborted");
}
