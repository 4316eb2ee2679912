//! Content compiled into the binary, used when no data directory is given.

use rapsim_core::{AiRapper, EventTemplate, GameConfig};

use crate::loaders::{ConfigLoader, EventLoader, LoadResult, RosterLoader};

const CONFIG: &str = include_str!("../../data/config.toml");
const EVENTS: &str = include_str!("../../data/events.ron");
const ROSTER: &str = include_str!("../../data/rappers.ron");

pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn events() -> LoadResult<Vec<EventTemplate>> {
    EventLoader::parse(EVENTS)
}

pub fn roster() -> LoadResult<Vec<AiRapper>> {
    RosterLoader::parse(ROSTER)
}
