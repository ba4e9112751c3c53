// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Serves the workout ledger and product store to the map frontend.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::{Config, StorageKind},
    db::{FileStore, MemoryStore, SharedStore},
    services::{AnyBackend, ConfiguredPosition, EntityStore, Tracker},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, storage = ?config.storage, "Starting Workout Tracker API");

    let store: SharedStore = match config.storage {
        StorageKind::File => Arc::new(FileStore::open(&config.data_dir)?),
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Restore saved workouts
    let position = ConfiguredPosition::new(config.home);
    let tracker = Tracker::load(store.clone(), config.map_zoom, &position)?;
    tracing::info!(count = tracker.ledger().len(), "Workouts loaded");

    let products = EntityStore::new(AnyBackend::from_config(
        store,
        config.products_api_url.as_deref(),
    ));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tracker: Mutex::new(tracker),
        products,
    });

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
