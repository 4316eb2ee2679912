//! Session orchestrator.
//!
//! A session owns the background workers, wires up command/event channels,
//! and exposes a builder-based API for clients to drive one career.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use rapsim_core::{AiRapper, EventTemplate, GameConfig, GameState, default_pool};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::events::EventBus;
use crate::repository::{
    FileSaveBackend, FileSettingsStore, SaveBackend, SaveKey, SettingsStore,
};
use crate::workers::{AutoSaveOutcome, AutoSaveWorker, AutoSaver, SimulationWorker, WorkerCommand};

/// Session configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Spawn the periodic auto-save worker.
    pub auto_save_enabled: bool,
    pub auto_save_interval: Duration,
    pub user_id: String,
    pub save_slot: u32,
    /// Root of the file save backend and the settings file.
    pub save_dir: PathBuf,
}

impl SessionConfig {
    pub fn save_key(&self) -> SaveKey {
        SaveKey::new(self.user_id.clone(), self.save_slot)
    }

    /// Platform data directory, or `./saves` when none can be determined.
    pub fn default_save_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "rapsim")
            .map(|dirs| dirs.data_dir().join("saves"))
            .unwrap_or_else(|| PathBuf::from("./saves"))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            auto_save_enabled: true,
            auto_save_interval: Duration::from_secs(60),
            user_id: "local".to_string(),
            save_slot: 0,
            save_dir: Self::default_save_dir(),
        }
    }
}

/// A running career session.
///
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Session {
    handle: SessionHandle,
    saver: Arc<AutoSaver>,
    sim_worker_handle: JoinHandle<()>,
    autosave: Option<(JoinHandle<()>, watch::Sender<bool>)>,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn saver(&self) -> Arc<AutoSaver> {
        Arc::clone(&self.saver)
    }

    /// Saves the current state right away, ignoring the auto-save setting.
    pub async fn save_now(&self) -> Result<AutoSaveOutcome> {
        let state = self.handle.snapshot().await?;
        Ok(self.saver.save(state).await)
    }

    /// Loads the configured slot into the running session.
    ///
    /// Returns `false` when the slot is empty.
    pub async fn load_saved(&self) -> Result<bool> {
        match self.saver.restore().await? {
            Some(save) => {
                self.handle.replace_state(save.state).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Shutdown the session gracefully
    pub async fn shutdown(self) -> Result<()> {
        if let Some((worker, shutdown_tx)) = self.autosave {
            let _ = shutdown_tx.send(true);
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }

        self.handle.shutdown_worker().await?;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    game_config: GameConfig,
    state: Option<GameState>,
    seed: Option<u64>,
    event_pool: Option<Vec<EventTemplate>>,
    rappers: Vec<AiRapper>,
    primary: Option<Arc<dyn SaveBackend>>,
    fallback: Option<Arc<dyn SaveBackend>>,
    settings: Option<Arc<dyn SettingsStore>>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            game_config: GameConfig::default(),
            state: None,
            seed: None,
            event_pool: None,
            rappers: Vec::new(),
            primary: None,
            fallback: None,
            settings: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    /// Continue an existing career. Seed, pool, and roster are ignored.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Seed for a fresh career (default: current time).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Event pool for a fresh career (default: the built-in pool).
    pub fn event_pool(mut self, pool: Vec<EventTemplate>) -> Self {
        self.event_pool = Some(pool);
        self
    }

    pub fn rappers(mut self, rappers: Vec<AiRapper>) -> Self {
        self.rappers = rappers;
        self
    }

    /// Primary save backend (default: JSON files under `save_dir`).
    pub fn save_backend(mut self, backend: Arc<dyn SaveBackend>) -> Self {
        self.primary = Some(backend);
        self
    }

    /// Backend that takes saves the primary rejects.
    pub fn fallback_backend(mut self, backend: Arc<dyn SaveBackend>) -> Self {
        self.fallback = Some(backend);
        self
    }

    /// Settings store (default: `settings.json` under `save_dir`).
    pub fn settings_store(mut self, settings: Arc<dyn SettingsStore>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the session and spawn its workers
    pub async fn build(self) -> Result<Session> {
        let initial_state = match self.state {
            Some(state) => state,
            None => {
                let seed = self
                    .seed
                    .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs());
                GameState::with_config(seed, &self.game_config)
                    .with_rappers(self.rappers)
                    .and_then(|state| {
                        state.with_event_pool(self.event_pool.unwrap_or_else(default_pool))
                    })
                    .map_err(RuntimeError::InitialState)?
            }
        };

        let primary = self.primary.unwrap_or_else(|| {
            Arc::new(FileSaveBackend::new(&self.config.save_dir)) as Arc<dyn SaveBackend>
        });
        let settings = self.settings.unwrap_or_else(|| {
            Arc::new(FileSettingsStore::new(
                self.config.save_dir.join("settings.json"),
            )) as Arc<dyn SettingsStore>
        });

        let (command_tx, command_rx) =
            mpsc::channel::<WorkerCommand>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = SessionHandle::new(
            command_tx,
            event_bus.clone(),
            self.game_config.nearby_window,
        );

        let sim_worker = SimulationWorker::new(
            initial_state,
            self.game_config,
            command_rx,
            event_bus.clone(),
        );
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        let saver = Arc::new(AutoSaver::new(
            self.config.save_key(),
            primary,
            self.fallback,
            settings,
            event_bus,
        ));

        let autosave = if self.config.auto_save_enabled {
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let worker = AutoSaveWorker::new(
                Arc::clone(&saver),
                handle.clone(),
                self.config.auto_save_interval,
                shutdown_rx,
            );
            Some((
                tokio::spawn(async move {
                    worker.run().await;
                }),
                shutdown_tx,
            ))
        } else {
            None
        };

        tracing::info!(
            "Session started for {} (auto-save {})",
            self.config.save_key(),
            if autosave.is_some() { "on" } else { "off" }
        );

        Ok(Session {
            handle,
            saver,
            sim_worker_handle,
            autosave,
        })
    }
}
