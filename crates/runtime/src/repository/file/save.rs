//! File-based SaveBackend implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::repository::{RepositoryError, Result, SaveBackend, SaveGame, SaveKey};

/// File-based implementation of [`SaveBackend`].
///
/// # File Format
///
/// Saves are stored as pretty JSON under `{base_dir}/{user_id}/slot_{n}.json`.
/// Writes go to a temp file first and are renamed into place, so a crash
/// never leaves a half-written slot behind.
pub struct FileSaveBackend {
    base_dir: PathBuf,
}

impl FileSaveBackend {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn user_dir(&self, user_id: &str) -> PathBuf {
        self.base_dir.join(user_id)
    }

    fn slot_path(&self, key: &SaveKey) -> PathBuf {
        self.user_dir(&key.user_id)
            .join(format!("slot_{}.json", key.slot))
    }
}

#[async_trait]
impl SaveBackend for FileSaveBackend {
    async fn save(&self, key: &SaveKey, save: &SaveGame) -> Result<()> {
        let path = self.slot_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(self.user_dir(&key.user_id)).await?;
        let bytes = serde_json::to_vec_pretty(save)?;
        fs::write(&temp_path, bytes).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved {} to {}", key, path.display());
        Ok(())
    }

    async fn load(&self, key: &SaveKey) -> Result<Option<SaveGame>> {
        let path = self.slot_path(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(RepositoryError::Io(error)),
        };

        let save: SaveGame = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;
        save.verify()?;

        tracing::debug!("Loaded {} from {}", key, path.display());
        Ok(Some(save))
    }

    async fn delete(&self, key: &SaveKey) -> Result<()> {
        match fs::remove_file(self.slot_path(key)).await {
            Ok(()) => {
                tracing::debug!("Deleted {}", key);
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(RepositoryError::Io(error)),
        }
    }

    async fn list_slots(&self, user_id: &str) -> Result<Vec<u32>> {
        let mut entries = match fs::read_dir(self.user_dir(user_id)).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(RepositoryError::Io(error)),
        };

        let mut slots = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename
                    .strip_prefix("slot_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(slot) = slot.parse::<u32>()
            {
                slots.push(slot);
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
