//! Repository contracts for saving and loading careers.

use async_trait::async_trait;

use super::error::Result;
use super::types::{SaveGame, SaveKey, Settings};

/// Remote-style save storage: one record per user and slot.
///
/// Loads verify the record's digest; a mismatch surfaces as
/// [`super::RepositoryError::CorruptedData`].
#[async_trait]
pub trait SaveBackend: Send + Sync {
    /// Writes (or overwrites) the save at `key`.
    async fn save(&self, key: &SaveKey, save: &SaveGame) -> Result<()>;

    /// Loads the save at `key`, `None` if the slot is empty.
    async fn load(&self, key: &SaveKey) -> Result<Option<SaveGame>>;

    /// Deletes the save at `key`. Deleting an empty slot is not an error.
    async fn delete(&self, key: &SaveKey) -> Result<()>;

    /// Occupied slots for `user_id`, ascending.
    async fn list_slots(&self, user_id: &str) -> Result<Vec<u32>>;
}

/// Key-value preferences store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored settings, or defaults when nothing was written yet.
    async fn load(&self) -> Result<Settings>;

    async fn save(&self, settings: &Settings) -> Result<()>;

    /// Read-modify-write helper.
    async fn update(&self, apply: &(dyn for<'s> Fn(&'s mut Settings) + Send + Sync)) -> Result<Settings> {
        let mut settings = self.load().await?;
        apply(&mut settings);
        self.save(&settings).await?;
        Ok(settings)
    }
}
