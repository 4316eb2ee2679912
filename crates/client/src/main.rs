//! Rapper career simulator client binary.
//!
//! Composition root: configuration from the environment, file logging,
//! content, a session with auto-save, then the command loop.

use std::sync::Arc;

use anyhow::{Context, Result};

use rapsim_client::repl::Repl;
use rapsim_client::{ClientConfig, logging};
use rapsim_content::ContentFactory;
use rapsim_runtime::{FileSaveBackend, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();

    let session_id = format!("{}_{}", config.user_id, logging::session_id());
    let log_file = logging::setup_logging(&session_id)?;

    tracing::info!("Starting rapsim client");
    tracing::info!("Save key: {}", config.session_config().save_key());

    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    let seed = config
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs());
    let (game_config, state) = factory
        .new_game(seed)
        .context("failed to load game content")?;

    let session = Session::builder()
        .config(config.session_config())
        .game_config(game_config)
        .initial_state(state)
        .fallback_backend(Arc::new(FileSaveBackend::new(config.fallback_dir())))
        .build()
        .await?;

    match session.load_saved().await {
        Ok(true) => println!("continuing saved career"),
        Ok(false) => println!("new career (seed {seed})"),
        Err(e) => {
            tracing::warn!("Could not load save: {}", e);
            println!("could not load save ({e}); starting a new career");
        }
    }
    println!("logs: {}", log_file.display());

    let result = Repl::new(&session).run().await;

    if config.auto_save {
        session.save_now().await?;
    }
    session.shutdown().await?;

    tracing::info!("Client shutdown complete");
    result
}
