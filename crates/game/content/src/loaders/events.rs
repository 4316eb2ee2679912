//! Event catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use rapsim_core::EventTemplate;
use rapsim_core::events::{AI_TRACK_FEATURE_ID, FEATURE_REQUEST_ID};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Event catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<EventTemplate>,
}

/// Loader for the event catalog from RON files.
pub struct EventLoader;

impl EventLoader {
    /// Load the event catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EventTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and check a catalog.
    ///
    /// The per-week feature templates must be present, ids must be unique,
    /// and every template needs at least one option.
    pub fn parse(content: &str) -> LoadResult<Vec<EventTemplate>> {
        let catalog: EventCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse event catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for template in &catalog.events {
            anyhow::ensure!(
                seen.insert(template.id.as_str()),
                "event '{}' is defined more than once",
                template.id
            );
            anyhow::ensure!(
                !template.options.is_empty(),
                "event '{}' has no options",
                template.id
            );
        }
        for required in [FEATURE_REQUEST_ID, AI_TRACK_FEATURE_ID] {
            anyhow::ensure!(
                seen.contains(required),
                "event catalog is missing '{}'",
                required
            );
        }

        Ok(catalog.events)
    }
}
