use std::collections::BTreeSet;

use tracing::debug;

use crate::engine::{AlbumRuleViolation, EngineError, StateReducer};
use crate::env::{GameEnv, compute_seed, roll};
use crate::state::{
    Album, AlbumId, AlbumKind, ArtistId, GameState, Song, SongId, SongTier, StatKind,
    StreamingPlatformKind,
};
use crate::streaming::{BiasVariant, generate_distribution};

use super::{CommandTransition, ensure_idle};

/// Highest value of the random part of a recording score.
const RECORDING_ROLL_MAX: u32 = 40;
/// Score bonus per featured artist.
const FEATURE_SCORE_BONUS: u32 = 5;
/// Reputation gained per album release.
const ALBUM_REPUTATION_GAIN: i32 = 2;

/// Records a new, unreleased song.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordSong {
    pub title: String,
    pub featuring: Vec<ArtistId>,
}

impl RecordSong {
    pub fn new(title: impl Into<String>, featuring: Vec<ArtistId>) -> Self {
        Self {
            title: title.into(),
            featuring,
        }
    }
}

impl CommandTransition for RecordSong {
    type Output = SongId;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), EngineError> {
        ensure_idle(state)?;
        if self.title.trim().is_empty() {
            return Err(EngineError::InvalidInput("song title must not be empty"));
        }
        if let Some(missing) = self
            .featuring
            .iter()
            .find(|artist| state.rapper(**artist).is_none())
        {
            return Err(EngineError::UnknownArtist(*missing));
        }
        let cost = env.config().recording_cost;
        if state.stats.wealth < cost {
            return Err(EngineError::InsufficientFunds {
                required: cost,
                available: state.stats.wealth,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<SongId, EngineError> {
        let seed = compute_seed(state.game_seed, state.nonce, 0, roll::SONG_TIER);
        let score = u32::from(state.stats.creativity)
            + env.rng().range(seed, 0, RECORDING_ROLL_MAX)
            + FEATURE_SCORE_BONUS * self.featuring.len() as u32;
        let tier = SongTier::from_score(score);

        let week = state.week;
        let mut reducer = StateReducer::new(state);
        let id = reducer.allocate_song_id();
        reducer
            .stats()
            .adjust_wealth(-(env.config().recording_cost.min(i64::MAX as u64) as i64));
        reducer.stats().adjust(StatKind::Creativity, 1);
        reducer.songs().add(Song::recorded(
            id,
            self.title.trim(),
            tier,
            self.featuring.clone(),
            week,
        ));

        debug!(%id, score, ?tier, "song recorded");
        Ok(id)
    }
}

/// Releases a recorded song on a set of platforms (empty means all).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseSong {
    pub song: SongId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub platforms: BTreeSet<StreamingPlatformKind>,
}

impl ReleaseSong {
    pub fn everywhere(song: SongId) -> Self {
        Self {
            song,
            platforms: BTreeSet::new(),
        }
    }
}

impl CommandTransition for ReleaseSong {
    type Output = SongId;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        ensure_idle(state)?;
        let song = state
            .song(self.song)
            .ok_or(EngineError::UnknownSong(self.song))?;
        if song.is_released() {
            return Err(EngineError::AlreadyReleased(self.song));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<SongId, EngineError> {
        let week = state.week;
        let song = state
            .song_mut(self.song)
            .ok_or(EngineError::UnknownSong(self.song))?;

        song.release_date = Some(week);
        song.release_platforms = self.platforms.clone();
        song.performance_status_week = week;
        song.last_week_streams = 0;
        song.platform_stream_distribution = Some(generate_distribution(
            &song.distribution_key(),
            song.streams,
            &song.release_platforms,
            BiasVariant::Wide,
        ));

        debug!(song = %self.song, platforms = self.platforms.len(), "song released");
        Ok(self.song)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        match state.song(self.song) {
            Some(song) if song.has_consistent_distribution() => Ok(()),
            _ => Err(EngineError::InvariantViolation(
                "released song distribution must sum to its streams",
            )),
        }
    }
}

/// Bundles released songs into an album.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseAlbum {
    pub title: String,
    pub kind: AlbumKind,
    pub songs: Vec<SongId>,
}

impl CommandTransition for ReleaseAlbum {
    type Output = AlbumId;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        ensure_idle(state)?;
        if self.title.trim().is_empty() {
            return Err(EngineError::InvalidInput("album title must not be empty"));
        }

        let count = self.songs.len();
        let (min, max) = self.kind.track_bounds();
        if count < min || max.is_some_and(|max| count > max) {
            return Err(AlbumRuleViolation::TrackCount {
                kind: self.kind,
                count,
            }
            .into());
        }

        let mut seen = BTreeSet::new();
        for id in &self.songs {
            if !seen.insert(*id) {
                return Err(AlbumRuleViolation::DuplicateSong(*id).into());
            }
            let song = state.song(*id).ok_or(EngineError::UnknownSong(*id))?;
            if !song.is_released() {
                return Err(AlbumRuleViolation::UnreleasedSong(*id).into());
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<AlbumId, EngineError> {
        let id = state.allocate_album_id();
        let mut album = Album::new(
            id,
            self.title.trim(),
            self.kind,
            self.songs.clone(),
            state.week,
        );
        album.streams = self
            .songs
            .iter()
            .filter_map(|song| state.song(*song))
            .map(|song| song.streams)
            .sum();
        album.certify();
        state.albums.push(album);

        StateReducer::new(state)
            .stats()
            .adjust(StatKind::Reputation, ALBUM_REPUTATION_GAIN);

        debug!(%id, kind = %self.kind, tracks = self.songs.len(), "album released");
        Ok(id)
    }
}

/// Stops a song from accruing streams. Idempotent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeactivateSong {
    pub song: SongId,
}

impl CommandTransition for DeactivateSong {
    type Output = bool;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        ensure_idle(state)?;
        state
            .song(self.song)
            .map(|_| ())
            .ok_or(EngineError::UnknownSong(self.song))
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<bool, EngineError> {
        StateReducer::new(state)
            .songs()
            .deactivate(self.song)
            .ok_or(EngineError::UnknownSong(self.song))
    }
}
