//! Content loaders for reading game data from files.
//!
//! RON holds catalogs (events, rappers); TOML holds tunables.

pub mod bundled;
pub mod config;
pub mod events;
pub mod factory;
pub mod roster;

pub use config::ConfigLoader;
pub use events::{EventCatalog, EventLoader};
pub use factory::ContentFactory;
pub use roster::{Roster, RosterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
