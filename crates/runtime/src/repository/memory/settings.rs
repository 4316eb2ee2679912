//! In-memory settings store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::repository::{RepositoryError, Result, Settings, SettingsStore};

#[derive(Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<Settings>,
}

impl InMemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Result<Settings> {
        self.settings
            .read()
            .map(|settings| settings.clone())
            .map_err(|_| RepositoryError::LockPoisoned)
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let mut stored = self
            .settings
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = settings.clone();
        Ok(())
    }
}
