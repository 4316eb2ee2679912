use tracing::trace;

use crate::engine::StateReducer;
use crate::state::{ArtistId, Effect, EventOption, GameState, Song, SongTier};
use crate::streaming::ensure_distribution;

use super::catalog::RAPPER_PLACEHOLDER;

impl EventOption {
    /// Applies the option with no subject rapper bound.
    ///
    /// Subject-bound effects (relationships, popularity, feature songs) are
    /// skipped. See [`EventOption::apply_with`].
    pub fn apply(&self, state: &GameState) -> GameState {
        self.apply_with(state, None)
    }

    /// Pure `GameState -> GameState` transform.
    ///
    /// The input is cloned and never touched, so applying the same option to
    /// the same state twice yields equal results.
    pub fn apply_with(&self, state: &GameState, subject: Option<ArtistId>) -> GameState {
        let mut next = state.clone();
        let mut reducer = StateReducer::new(&mut next);
        for effect in &self.effects {
            apply_effect(&mut reducer, effect, subject);
        }
        next
    }
}

fn apply_effect(reducer: &mut StateReducer<'_>, effect: &Effect, subject: Option<ArtistId>) {
    trace!(?effect, ?subject, "applying event effect");
    match effect {
        Effect::AdjustStat { stat, delta } => reducer.stats().adjust(*stat, *delta),
        Effect::AdjustWealth { delta } => reducer.stats().adjust_wealth(*delta),
        Effect::AdjustFollowers { platform, delta } => {
            reducer.social().adjust_followers(*platform, *delta)
        }
        Effect::BoostSongStreams { percent } => {
            if let Some(id) = reducer.state().latest_release().map(|song| song.id) {
                reducer.songs().boost(id, *percent);
            }
        }
        Effect::ReleaseFeatureSong {
            title,
            tier,
            streams,
        } => {
            if let Some(subject) = subject {
                release_feature_song(reducer, title, *tier, *streams, subject);
            }
        }
        Effect::SetRelationship { status } => {
            if let Some(subject) = subject {
                reducer.rappers().set_relationship(subject, *status);
            }
        }
        Effect::AdjustRapperPopularity { delta } => {
            if let Some(subject) = subject {
                reducer.rappers().adjust_popularity(subject, *delta);
            }
        }
    }
}

fn release_feature_song(
    reducer: &mut StateReducer<'_>,
    title: &str,
    tier: SongTier,
    streams: u64,
    subject: ArtistId,
) {
    let Some(name) = reducer.state().rapper(subject).map(|rapper| rapper.name.clone()) else {
        return;
    };
    let week = reducer.state().week;
    let id = reducer.allocate_song_id();

    let mut song = Song::recorded(
        id,
        title.replace(RAPPER_PLACEHOLDER, &name),
        tier,
        vec![subject],
        week,
    );
    song.release_date = Some(week);
    song.streams = streams;
    ensure_distribution(&mut song);
    reducer.songs().add(song);
}
