//! File logging for the terminal client.
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Sends logs to `{cache}/logs/{session}/client.log`; stdout stays free for
/// the command loop.
pub fn setup_logging(session_id: &str) -> Result<PathBuf> {
    let session_log_dir = log_directory().join(session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    // Keep the writer alive for the rest of the process.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    Ok(session_log_dir.join("client.log"))
}

/// Session id derived from the wall clock.
pub fn session_id() -> String {
    format!("session_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
}

fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "rapsim")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("rapsim").join("logs"))
}
