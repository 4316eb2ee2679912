use std::path::PathBuf;

use rapsim_content::{ConfigLoader, ContentFactory, EventLoader, RosterLoader};
use rapsim_core::{EventKind, GameConfig, GameState};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_config_matches_defaults() {
    let config = ConfigLoader::load(&data_dir().join("config.toml")).expect("config parses");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn shipped_catalog_installs_into_a_game() {
    let events = EventLoader::load(&data_dir().join("events.ron")).expect("catalog parses");
    let rappers = RosterLoader::load(&data_dir().join("rappers.ron")).expect("roster parses");

    let state = GameState::new(1)
        .with_rappers(rappers)
        .expect("roster ids are valid")
        .with_event_pool(events)
        .expect("catalog ids are valid");

    let kind = |id: &str| {
        state
            .event_template(id)
            .map(|template| template.kind())
            .expect("template exists")
    };
    assert_eq!(kind("label_deal_offer"), EventKind::Opportunity);
    assert_eq!(kind("sample_lawsuit"), EventKind::Challenge);
    assert_eq!(kind("studio_session"), EventKind::Neutral);
}

#[test]
fn factory_builds_a_playable_state() {
    let (config, state) = ContentFactory::new(data_dir())
        .new_game(42)
        .expect("content loads");

    assert_eq!(state.game_seed, 42);
    assert_eq!(state.stats.wealth, config.starting_wealth);
    assert_eq!(state.rappers.len(), 8);
    assert!(state.event_template("feature_request").is_some());
}
