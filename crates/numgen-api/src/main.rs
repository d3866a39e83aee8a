//! Numgen API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use numgen_api::config::AppConfig;
use numgen_api::error::AppError;
use numgen_api::state::AppState;
use numgen_core::clock::SystemClock;
use numgen_core::rng::StdRandom;
use numgen_generator::application::command_handlers;
use numgen_store::json_file_store::JsonFileHistoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Numgen API server");

    let config = AppConfig::from_env()?;

    // Restore the persisted history before accepting requests.
    let history_store = Arc::new(JsonFileHistoryStore::new(&config.history_path));
    tracing::info!(path = %history_store.path().display(), "using history file");
    let generator = command_handlers::restore_state(history_store.as_ref()).await;

    let rng = match config.rng_seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_os(),
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(Mutex::new(rng)),
        history_store,
        generator,
        config.reveal,
    );
    let app = numgen_api::build_router(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;

    axum::serve(listener, app).await.map_err(AppError::Serve)?;

    Ok(())
}
