//! Tournament backend binary entrypoint wiring REST, authentication and MongoDB layers.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use config::AppConfig;
use dao::entity_store::{
    EntityStore,
    mongodb::{MongoConfig, MongoEntityStore},
};
use state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config.clone());

    tokio::spawn(run_store_supervisor(
        app_state.clone(),
        config.mongo_uri.clone(),
        config.mongo_db.clone(),
    ));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Supervises the MongoDB connection by retrying in the background and toggling
/// degraded mode when connectivity changes.
async fn run_store_supervisor(state: SharedState, uri: String, db_name: String) {
    let initial_delay_ms = 1000;
    let mut delay = Duration::from_millis(initial_delay_ms);
    let max_delay = Duration::from_secs(10);

    loop {
        if let Some(store) = state.store().await {
            match store.health_check().await {
                Ok(()) => {
                    // Healthy connection: reset the retry backoff and avoid
                    // hammering the database with pings.
                    delay = Duration::from_millis(initial_delay_ms);
                    sleep(Duration::from_secs(5)).await;
                }
                Err(err) => {
                    // Existing connection failed: drop it, flip to degraded
                    // mode, and retry with exponential backoff.
                    warn!(error = %err, "MongoDB ping failed; entering degraded mode");
                    state.clear_store().await;
                    sleep(delay).await;
                    delay = (delay * 2).min(max_delay);
                }
            }
            continue;
        }

        let connected = async {
            let mongo_config = MongoConfig::from_uri(&uri, &db_name).await?;
            MongoEntityStore::connect(mongo_config).await
        }
        .await;

        match connected {
            Ok(store) => {
                // Fresh connection and indexes ready: install it and leave
                // degraded mode.
                info!("connected to MongoDB; leaving degraded mode");
                state.install_store(Arc::new(store)).await;
                delay = Duration::from_millis(initial_delay_ms);
            }
            Err(err) => {
                // Could not reach MongoDB or prepare its indexes: wait and
                // retry with exponential backoff.
                warn!(error = %err, "MongoDB connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(max_delay);
            }
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Install the tracing subscriber, honoring `RUST_LOG` when set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tourney_back=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve once Ctrl+C or SIGTERM arrives, triggering graceful shutdown.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received; draining connections");
}
