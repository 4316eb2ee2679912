//! Content factory for assembling a new game from data files.

use std::path::{Path, PathBuf};

use rapsim_core::{AiRapper, EventTemplate, GameConfig, GameState};

use crate::loaders::{ConfigLoader, EventLoader, LoadResult, RosterLoader, bundled};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── events.ron
/// └── rappers.ron
/// ```
///
/// A file missing from the directory falls back to the bundled copy.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Factory that only serves the bundled content.
    pub fn bundled() -> Self {
        Self { data_dir: None }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match self.existing("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => bundled::config(),
        }
    }

    /// Load the event catalog from `events.ron`.
    pub fn load_events(&self) -> LoadResult<Vec<EventTemplate>> {
        match self.existing("events.ron") {
            Some(path) => EventLoader::load(&path),
            None => bundled::events(),
        }
    }

    /// Load the AI rapper roster from `rappers.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<AiRapper>> {
        match self.existing("rappers.ron") {
            Some(path) => RosterLoader::load(&path),
            None => bundled::roster(),
        }
    }

    /// Fresh career seeded with `game_seed`, using this factory's content.
    pub fn new_game(&self, game_seed: u64) -> LoadResult<(GameConfig, GameState)> {
        let config = self.load_config()?;
        let state = GameState::with_config(game_seed, &config)
            .with_rappers(self.load_roster()?)?
            .with_event_pool(self.load_events()?)?;
        Ok((config, state))
    }

    /// Returns the data directory path, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(file))
            .filter(|path| path.exists())
    }
}
