//! Records exchanged with save backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rapsim_core::GameState;

use super::error::{RepositoryError, Result};

/// Save format version written into every [`SaveGame`].
pub const SAVE_VERSION: u32 = 1;

/// Addresses one save slot of one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaveKey {
    pub user_id: String,
    pub slot: u32,
}

impl SaveKey {
    pub fn new(user_id: impl Into<String>, slot: u32) -> Self {
        Self {
            user_id: user_id.into(),
            slot,
        }
    }
}

impl std::fmt::Display for SaveKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/slot_{}", self.user_id, self.slot)
    }
}

/// A persisted game together with its integrity digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// Hex-encoded SHA-256 of `state`.
    pub digest: String,
    pub state: GameState,
}

impl SaveGame {
    /// Wraps `state`, stamping the current time and its digest.
    pub fn new(state: GameState) -> Result<Self> {
        let digest = Self::digest_of(&state)?;
        Ok(Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            digest,
            state,
        })
    }

    /// Recomputes the digest and compares it with the stored one.
    pub fn verify(&self) -> Result<()> {
        if self.version != SAVE_VERSION {
            return Err(RepositoryError::CorruptedData(format!(
                "unsupported save version {}",
                self.version
            )));
        }
        let actual = Self::digest_of(&self.state)?;
        if actual != self.digest {
            return Err(RepositoryError::CorruptedData(format!(
                "digest mismatch: stored {}, computed {}",
                self.digest, actual
            )));
        }
        Ok(())
    }

    fn digest_of(state: &GameState) -> Result<String> {
        state
            .digest()
            .map(hex::encode)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

/// User preferences kept next to the saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auto_save_enabled: bool,
    pub last_auto_save: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save_enabled: true,
            last_auto_save: None,
        }
    }
}
