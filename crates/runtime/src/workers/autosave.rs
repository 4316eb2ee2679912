//! Auto-save with a local fallback.
//!
//! [`AutoSaver`] writes snapshots to a primary [`SaveBackend`]. When the
//! primary fails the snapshot goes to the fallback backend instead. There is
//! no retry: the next tick simply tries again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use rapsim_core::GameState;

use crate::api::SessionHandle;
use crate::events::{EventBus, SaveEvent, SessionEvent};
use crate::repository::{Result, SaveBackend, SaveGame, SaveKey, SettingsStore};

/// What one save attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    Saved,
    /// Primary failed; the fallback holds the save.
    Fallback { reason: String },
    /// Another save was still running.
    Skipped,
    /// Auto-save is turned off in settings.
    Disabled,
    Failed(String),
}

/// Clears the in-progress flag when a save attempt ends.
struct InProgress<'a>(&'a AtomicBool);

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct AutoSaver {
    key: SaveKey,
    primary: Arc<dyn SaveBackend>,
    fallback: Option<Arc<dyn SaveBackend>>,
    settings: Arc<dyn SettingsStore>,
    event_bus: EventBus,
    in_progress: AtomicBool,
}

impl AutoSaver {
    pub fn new(
        key: SaveKey,
        primary: Arc<dyn SaveBackend>,
        fallback: Option<Arc<dyn SaveBackend>>,
        settings: Arc<dyn SettingsStore>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            key,
            primary,
            fallback,
            settings,
            event_bus,
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn key(&self) -> &SaveKey {
        &self.key
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    /// Saves only when auto-save is enabled in settings.
    pub async fn auto_save(&self, state: GameState) -> AutoSaveOutcome {
        match self.settings.load().await {
            Ok(settings) if !settings.auto_save_enabled => {
                debug!("Auto-save disabled, skipping");
                AutoSaveOutcome::Disabled
            }
            Ok(_) => self.save(state).await,
            Err(e) => {
                warn!("Failed to read settings, saving anyway: {}", e);
                self.save(state).await
            }
        }
    }

    /// Saves unconditionally, unless another save is in flight.
    pub async fn save(&self, state: GameState) -> AutoSaveOutcome {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            debug!("Save already in progress, skipping");
            return AutoSaveOutcome::Skipped;
        }
        let _guard = InProgress(&self.in_progress);

        let save = match SaveGame::new(state) {
            Ok(save) => save,
            Err(e) => {
                error!("Failed to prepare save: {}", e);
                return self.failed(e.to_string());
            }
        };

        match self.primary.save(&self.key, &save).await {
            Ok(()) => {
                info!("Saved {} ({})", self.key, save.state.week);
                self.record_success(&save).await;
                self.event_bus.publish(SessionEvent::Save(SaveEvent::Saved {
                    key: self.key.clone(),
                    at: save.saved_at,
                }));
                AutoSaveOutcome::Saved
            }
            Err(primary_error) => self.save_fallback(&save, primary_error.to_string()).await,
        }
    }

    async fn save_fallback(&self, save: &SaveGame, reason: String) -> AutoSaveOutcome {
        let Some(fallback) = &self.fallback else {
            error!("Save to {} failed and no fallback is configured: {}", self.key, reason);
            return self.failed(reason);
        };

        warn!("Save to {} failed, using local fallback: {}", self.key, reason);
        match fallback.save(&self.key, save).await {
            Ok(()) => {
                self.record_success(save).await;
                self.event_bus.publish(SessionEvent::Save(SaveEvent::FellBack {
                    key: self.key.clone(),
                    at: save.saved_at,
                    reason: reason.clone(),
                }));
                AutoSaveOutcome::Fallback { reason }
            }
            Err(fallback_error) => {
                error!("Fallback save for {} failed: {}", self.key, fallback_error);
                self.failed(format!("{reason}; fallback: {fallback_error}"))
            }
        }
    }

    /// Loads the slot from the primary, falling back on primary errors.
    pub async fn restore(&self) -> Result<Option<SaveGame>> {
        match self.primary.load(&self.key).await {
            Ok(save) => Ok(save),
            Err(primary_error) => match &self.fallback {
                Some(fallback) => {
                    warn!(
                        "Load of {} failed, trying local fallback: {}",
                        self.key, primary_error
                    );
                    fallback.load(&self.key).await
                }
                None => Err(primary_error),
            },
        }
    }

    async fn record_success(&self, save: &SaveGame) {
        let saved_at = save.saved_at;
        if let Err(e) = self
            .settings
            .update(&move |settings| settings.last_auto_save = Some(saved_at))
            .await
        {
            warn!("Failed to record last auto-save time: {}", e);
        }
    }

    fn failed(&self, reason: String) -> AutoSaveOutcome {
        self.event_bus.publish(SessionEvent::Save(SaveEvent::Failed {
            reason: reason.clone(),
        }));
        AutoSaveOutcome::Failed(reason)
    }
}

/// Periodically snapshots the session and hands it to an [`AutoSaver`].
pub struct AutoSaveWorker {
    saver: Arc<AutoSaver>,
    handle: SessionHandle,
    interval: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl AutoSaveWorker {
    pub fn new(
        saver: Arc<AutoSaver>,
        handle: SessionHandle,
        interval: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            saver,
            handle,
            interval,
            shutdown_rx,
        }
    }

    /// Main worker loop. The first save happens one interval after start.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.interval,
            self.interval,
        );
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let state = match self.handle.snapshot().await {
                        Ok(state) => state,
                        Err(e) => {
                            debug!("Auto-save stopping, session unavailable: {}", e);
                            break;
                        }
                    };
                    let outcome = self.saver.auto_save(state).await;
                    debug!(?outcome, at = %Utc::now(), "auto-save tick");
                }
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("AutoSaveWorker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemorySaveBackend, InMemorySettingsStore, Settings};

    fn saver(
        primary: Arc<InMemorySaveBackend>,
        fallback: Option<Arc<InMemorySaveBackend>>,
        settings: Arc<InMemorySettingsStore>,
    ) -> AutoSaver {
        AutoSaver::new(
            SaveKey::new("tester", 0),
            primary,
            fallback.map(|backend| backend as Arc<dyn SaveBackend>),
            settings,
            EventBus::new(),
        )
    }

    #[tokio::test]
    async fn successful_save_stamps_settings() {
        let primary = Arc::new(InMemorySaveBackend::new());
        let settings = Arc::new(InMemorySettingsStore::default());
        let saver = saver(primary.clone(), None, settings.clone());

        assert_eq!(saver.save(GameState::new(1)).await, AutoSaveOutcome::Saved);
        assert_eq!(primary.len(), 1);
        assert!(settings.load().await.unwrap().last_auto_save.is_some());
    }

    #[tokio::test]
    async fn offline_primary_falls_back() {
        let primary = Arc::new(InMemorySaveBackend::new());
        primary.set_offline(true);
        let fallback = Arc::new(InMemorySaveBackend::new());
        let settings = Arc::new(InMemorySettingsStore::default());
        let saver = saver(primary.clone(), Some(fallback.clone()), settings);

        let outcome = saver.save(GameState::new(2)).await;
        assert!(matches!(outcome, AutoSaveOutcome::Fallback { .. }));
        assert!(primary.is_empty());
        assert_eq!(fallback.len(), 1);

        let restored = saver.restore().await.unwrap().unwrap();
        assert_eq!(restored.state, GameState::new(2));
    }

    #[tokio::test]
    async fn both_backends_down_fails() {
        let primary = Arc::new(InMemorySaveBackend::new());
        primary.set_offline(true);
        let fallback = Arc::new(InMemorySaveBackend::new());
        fallback.set_offline(true);
        let settings = Arc::new(InMemorySettingsStore::default());
        let saver = saver(primary, Some(fallback), settings.clone());

        assert!(matches!(
            saver.save(GameState::new(3)).await,
            AutoSaveOutcome::Failed(_)
        ));
        assert_eq!(settings.load().await.unwrap().last_auto_save, None);
    }

    #[tokio::test]
    async fn disabled_setting_suppresses_auto_save_only() {
        let primary = Arc::new(InMemorySaveBackend::new());
        let settings = Arc::new(InMemorySettingsStore::new(Settings {
            auto_save_enabled: false,
            last_auto_save: None,
        }));
        let saver = saver(primary.clone(), None, settings);

        assert_eq!(
            saver.auto_save(GameState::new(4)).await,
            AutoSaveOutcome::Disabled
        );
        assert!(primary.is_empty());
        assert_eq!(saver.save(GameState::new(4)).await, AutoSaveOutcome::Saved);
    }
}
