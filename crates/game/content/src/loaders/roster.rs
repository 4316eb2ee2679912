//! AI rapper roster loader.

use std::path::Path;

use rapsim_core::AiRapper;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub rappers: Vec<AiRapper>,
}

/// Loader for the competing AI rappers.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<AiRapper>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Id rules (unique, never the player's id) are enforced when the roster
    /// is installed into a game state; popularity is checked here.
    pub fn parse(content: &str) -> LoadResult<Vec<AiRapper>> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        if let Some(rapper) = roster.rappers.iter().find(|r| r.popularity > 100) {
            anyhow::bail!(
                "rapper '{}' has popularity {} (max 100)",
                rapper.name,
                rapper.popularity
            );
        }
        Ok(roster.rappers)
    }
}
