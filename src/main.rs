/// APOD screen service entry point
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod state;
mod utils;
mod view;

#[cfg(test)]
mod testing;

use crate::clients::NasaClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::ApodService;
use crate::state::OutcomeStore;
use crate::view::{select_view, ViewInstruction};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    if config.uses_demo_key() {
        warn!("NASA_API_KEY not set, using the shared rate-limited DEMO_KEY");
    }
    info!("Configuration loaded successfully");

    // Initialize client, store and service
    let nasa_client = NasaClient::new(config.nasa_api_key.clone(), config.request_timeout)?;
    let store = OutcomeStore::new();
    let apod_service = Arc::new(ApodService::new(nasa_client, store.clone()));

    start_view_listener(&store);

    // Fetch once on startup
    if apod_service.spawn_fetch().is_none() {
        warn!("Initial APOD fetch was not started");
    }

    let state = AppState { apod_service };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("apod_screen listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Re-evaluate the view on every outcome transition
fn start_view_listener(store: &OutcomeStore) {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    let view = select_view(&snapshot.outcome);
                    info!(
                        version = snapshot.version,
                        state = snapshot.outcome.label(),
                        "View updated: {}",
                        describe(&view)
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("View listener skipped {} transitions", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn describe(view: &ViewInstruction) -> String {
    match view {
        ViewInstruction::Progress { label } => label.to_string(),
        ViewInstruction::Error { message, .. } => message.clone(),
        ViewInstruction::Content(content) => format!("{} ({})", content.title, content.date),
    }
}
