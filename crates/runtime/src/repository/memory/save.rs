//! In-memory SaveBackend implementation.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::repository::{RepositoryError, Result, SaveBackend, SaveGame, SaveKey};

/// In-memory implementation of [`SaveBackend`].
///
/// Can be switched offline to exercise fallback paths.
#[derive(Default)]
pub struct InMemorySaveBackend {
    saves: RwLock<HashMap<SaveKey, SaveGame>>,
    offline: AtomicBool,
}

impl InMemorySaveBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with [`RepositoryError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.saves.read().map(|saves| saves.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(RepositoryError::Unavailable("in-memory backend is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SaveBackend for InMemorySaveBackend {
    async fn save(&self, key: &SaveKey, save: &SaveGame) -> Result<()> {
        self.ensure_online()?;
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(key.clone(), save.clone());
        Ok(())
    }

    async fn load(&self, key: &SaveKey) -> Result<Option<SaveGame>> {
        self.ensure_online()?;
        let save = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .get(key)
            .cloned();
        if let Some(save) = &save {
            save.verify()?;
        }
        Ok(save)
    }

    async fn delete(&self, key: &SaveKey) -> Result<()> {
        self.ensure_online()?;
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(key);
        Ok(())
    }

    async fn list_slots(&self, user_id: &str) -> Result<Vec<u32>> {
        self.ensure_online()?;
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<u32> = saves
            .keys()
            .filter(|key| key.user_id == user_id)
            .map(|key| key.slot)
            .collect();
        slots.sort_unstable();
        Ok(slots)
    }
}
