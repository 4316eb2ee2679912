//! Repository layer for persisted careers.
//!
//! Repositories handle data that outlives a session:
//! - Save games, one per user and slot
//! - User settings (auto-save preferences)
//!
//! Static content (events, rappers, tunables) lives in `rapsim-content`.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileSaveBackend, FileSettingsStore};
pub use memory::{InMemorySaveBackend, InMemorySettingsStore};
pub use traits::{SaveBackend, SettingsStore};
pub use types::{SAVE_VERSION, SaveGame, SaveKey, Settings};
