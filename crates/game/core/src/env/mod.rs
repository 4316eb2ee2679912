//! Read-only collaborators the engine consults while mutating state.
//!
//! [`GameEnv`] bundles the tunable [`GameConfig`] with an [`RngOracle`] so
//! tests can swap in a scripted generator without touching the engine.
mod rng;

pub use rng::{PcgRng, RngOracle, char_code_seed, compute_seed, roll};

use crate::config::GameConfig;

/// Aggregates the configuration and randomness used by the engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    /// Environment backed by the default PCG generator.
    pub fn with_config(config: &'a GameConfig) -> Self {
        static PCG: PcgRng = PcgRng;
        Self { config, rng: &PCG }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
