mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use batepapo_api::presence;
use batepapo_api::{AppStateInner, router};
use batepapo_db::{ChatStore, Database};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "batepapo=debug,batepapo_api=debug,batepapo_db=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Init storage
    let store: Arc<dyn ChatStore> = Arc::new(Database::open(&config.db_path)?);

    // Background presence sweep
    tokio::spawn(presence::run_presence_loop(store.clone(), config.presence));
    info!(
        "Presence sweep every {:?}, inactivity timeout {:?}",
        config.presence.sweep_interval, config.presence.inactive_timeout
    );

    let app = router(AppStateInner::new(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Resolves hostnames and bare IPv6 hosts such as `::`.
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Batepapo server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
