//! JSON file settings store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::repository::{RepositoryError, Result, Settings, SettingsStore};

/// Settings persisted as a single JSON document.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(error) => Err(RepositoryError::Io(error)),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(settings)?).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults_and_updates_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().await.unwrap(), Settings::default());

        store
            .update(&|settings| settings.auto_save_enabled = false)
            .await
            .unwrap();
        let reopened = FileSettingsStore::new(dir.path().join("settings.json"));
        assert!(!reopened.load().await.unwrap().auto_save_enabled);
        assert!(!dir.path().join("settings.json.tmp").exists());
    }

    #[tokio::test]
    async fn unreadable_document_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let result = FileSettingsStore::new(&path).load().await;
        assert!(matches!(result, Err(RepositoryError::Json(_))));
    }
}
