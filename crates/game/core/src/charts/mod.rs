//! Chart standings derived from a state snapshot.
//!
//! Nothing here is stored: every call ranks the player against the AI roster
//! from scratch.
use crate::state::{ArtistId, GameState, Song};

/// One artist's row on the global chart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartEntry {
    pub artist: ArtistId,
    pub name: String,
    pub total_streams: u64,
}

/// The player's position on the global chart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartStanding {
    /// 1-based.
    pub rank: usize,
    pub total_artists: usize,
    /// Share of the other artists the player outranks, `0..=100`.
    pub percentile: u32,
    /// Entries within `window` places of the player, player included.
    pub nearby: Vec<ChartEntry>,
}

/// Name the player's chart row is listed under.
pub const PLAYER_NAME: &str = "You";

/// Every artist, best first. Ties go to the lower artist id.
pub fn global_chart(state: &GameState) -> Vec<ChartEntry> {
    let mut entries = Vec::with_capacity(state.rappers.len() + 1);
    entries.push(ChartEntry {
        artist: ArtistId::PLAYER,
        name: PLAYER_NAME.to_string(),
        total_streams: state.total_streams(),
    });
    entries.extend(state.rappers.iter().map(|rapper| ChartEntry {
        artist: rapper.id,
        name: rapper.name.clone(),
        total_streams: rapper.total_streams,
    }));
    entries.sort_by(|a, b| {
        b.total_streams
            .cmp(&a.total_streams)
            .then(a.artist.cmp(&b.artist))
    });
    entries
}

/// Ranks the player and returns the entries around them.
pub fn global_standing(state: &GameState, window: usize) -> ChartStanding {
    let chart = global_chart(state);
    let total_artists = chart.len();
    let index = chart
        .iter()
        .position(|entry| entry.artist.is_player())
        .unwrap_or(0);
    let rank = index + 1;

    let others = total_artists.saturating_sub(1).max(1);
    let outranked = total_artists - rank;
    let percentile = u32::try_from(outranked * 100 / others).unwrap_or(100);

    let start = index.saturating_sub(window);
    let end = index.saturating_add(window).min(total_artists.saturating_sub(1));
    let nearby = chart[start..=end].to_vec();

    ChartStanding {
        rank,
        total_artists,
        percentile,
        nearby,
    }
}

/// The player's weekly song chart: active releases by last week's streams.
pub fn top_songs(state: &GameState, limit: usize) -> Vec<&Song> {
    let mut songs = state
        .songs
        .iter()
        .filter(|song| song.is_streaming())
        .collect::<Vec<_>>();
    songs.sort_by(|a, b| {
        b.last_week_streams
            .cmp(&a.last_week_streams)
            .then(a.id.cmp(&b.id))
    });
    songs.truncate(limit);
    songs
}
