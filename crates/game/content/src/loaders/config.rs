//! Game configuration loader.

use std::path::Path;

use rapsim_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        let growth = &config.growth;
        let probabilities = [
            growth.spike_base_chance,
            growth.slump_chance,
            growth.recovery_base_chance,
            config.events.pool_chance,
        ];
        anyhow::ensure!(
            probabilities.iter().all(|p| p.is_finite() && *p >= 0.0),
            "config probabilities must be finite and non-negative"
        );
        anyhow::ensure!(
            config.follower_rate.is_finite() && config.follower_rate >= 0.0,
            "follower_rate must be finite and non-negative"
        );
        anyhow::ensure!(
            growth.age_decay_floor > 0.0 && growth.age_decay_floor <= 1.0,
            "age_decay_floor must be in (0, 1]"
        );
        Ok(())
    }
}
