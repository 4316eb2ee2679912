//! Pure weekly simulation.
//!
//! [`simulate_week`] reads the current state and returns everything the next
//! week will look like. Nothing is written back until the week is committed.
use std::collections::BTreeMap;

use tracing::trace;

use crate::env::{GameEnv, compute_seed, roll};
use crate::state::{
    AiRapper, GameState, PerformanceType, SocialMediaPlatform, StagedWeek, StreamingPlatform,
    StreamingPlatformKind, WeeklySummary,
};
use crate::streaming::{add_weekly_streams, reclassify, saturating_u64, weekly_streams};

const MICROS_PER_DOLLAR: u64 = 1_000_000;
/// Weekly listeners scale to monthly listeners by 4/3.
const LISTENER_NUMERATOR: u64 = 4;
const LISTENER_DENOMINATOR: u64 = 3;

/// Computes the staged result of advancing out of the current week.
///
/// Infallible: every count saturates, and no float reaches the state
/// without a finiteness check.
pub fn simulate_week(state: &GameState, env: &GameEnv<'_>) -> StagedWeek {
    let config = env.config();
    let week = state.week;
    let before = state.aggregates();

    let mut summary = WeeklySummary {
        week,
        ..WeeklySummary::default()
    };
    let mut weekly_by_platform: BTreeMap<StreamingPlatformKind, u64> = BTreeMap::new();
    let mut new_streams_total: u64 = 0;

    let mut songs = state.songs.clone();
    for song in songs.iter_mut().filter(|song| song.is_streaming()) {
        let new_streams = weekly_streams(
            song,
            &state.stats,
            week,
            state.game_seed,
            &config.growth,
            env.rng(),
        );
        let increment = add_weekly_streams(song, week, new_streams);
        let new_streams = increment
            .values()
            .fold(0u64, |acc, streams| acc.saturating_add(*streams));
        for (kind, streams) in increment {
            let entry = weekly_by_platform.entry(kind).or_insert(0);
            *entry = entry.saturating_add(streams);
        }
        new_streams_total = new_streams_total.saturating_add(new_streams);

        if song.weeks_since_release(week) > 0 {
            let next = reclassify(
                song.performance,
                song.last_week_streams,
                new_streams,
                song.weeks_in_status(week),
                &config.classification,
            );
            if next != song.performance {
                trace!(song = %song.id, from = %song.performance, to = %next, "reclassified");
                song.performance = next;
                song.performance_status_week = week;
                match next {
                    PerformanceType::Viral => summary.viral_songs.push(song.id),
                    PerformanceType::Flop => summary.flopped_songs.push(song.id),
                    PerformanceType::Comeback => summary.comeback_songs.push(song.id),
                    PerformanceType::Normal => {}
                }
            }
        }
        song.last_week_streams = new_streams;
    }

    let streaming = state
        .streaming
        .iter()
        .map(|platform| {
            let weekly = weekly_by_platform
                .get(&platform.kind)
                .copied()
                .unwrap_or(0);
            let total_streams = songs
                .iter()
                .filter_map(|song| song.platform_stream_distribution.as_ref())
                .filter_map(|distribution| distribution.get(&platform.kind))
                .fold(0u64, |acc, streams| acc.saturating_add(*streams));
            let earned = weekly.saturating_mul(platform.kind.payout_micros()) / MICROS_PER_DOLLAR;
            StreamingPlatform {
                kind: platform.kind,
                listeners: weekly.saturating_mul(LISTENER_NUMERATOR) / LISTENER_DENOMINATOR,
                total_streams,
                revenue: platform.revenue.saturating_add(earned),
            }
        })
        .collect::<Vec<_>>();

    let marketing_boost = 1.0 + f64::from(state.stats.marketing) / 100.0;
    let gained_followers =
        saturating_u64(new_streams_total as f64 * config.follower_rate * marketing_boost);
    let social = state
        .social
        .iter()
        .map(|platform| SocialMediaPlatform {
            followers: platform.followers.saturating_add(saturating_u64(
                gained_followers as f64 * platform.kind.follower_weight(),
            )),
            ..platform.clone()
        })
        .collect::<Vec<_>>();

    let rappers = state
        .rappers
        .iter()
        .map(|rapper| drift_rapper(rapper, state, env))
        .collect::<Vec<_>>();

    let mut albums = state.albums.clone();
    for album in &mut albums {
        album.streams = album
            .song_ids
            .iter()
            .filter_map(|id| songs.iter().find(|song| song.id == *id))
            .fold(0u64, |acc, song| acc.saturating_add(song.streams));
    }

    let after = crate::state::Aggregates {
        streams: songs
            .iter()
            .fold(0u64, |acc, song| acc.saturating_add(song.streams)),
        followers: social
            .iter()
            .fold(0u64, |acc, platform| acc.saturating_add(platform.followers)),
        revenue: streaming
            .iter()
            .fold(0u64, |acc, platform| acc.saturating_add(platform.revenue)),
    };
    let deltas = WeeklySummary::from_aggregates(week, before, after);
    summary.new_streams = deltas.new_streams;
    summary.new_followers = deltas.new_followers;
    summary.revenue = deltas.revenue;

    StagedWeek {
        wealth: state.stats.wealth.saturating_add(summary.revenue),
        summary,
        songs,
        albums,
        streaming,
        social,
        rappers,
    }
}

/// AI rappers grow by about a week of their monthly audience and drift in
/// popularity.
fn drift_rapper(rapper: &AiRapper, state: &GameState, env: &GameEnv<'_>) -> AiRapper {
    let seed = |context| {
        compute_seed(
            state.game_seed,
            u64::from(state.week.0),
            rapper.id.0,
            context,
        )
    };
    let variance = env
        .rng()
        .range_f64(seed(roll::RAPPER_STREAMS), 0.85, 1.15);
    let weekly = saturating_u64((rapper.monthly_listeners / 4) as f64 * variance);

    let delta = env.rng().range(seed(roll::RAPPER_POPULARITY), 0, 4) as i32 - 2;
    let popularity = (i32::from(rapper.popularity) + delta).clamp(0, 100) as u8;
    let listeners_delta = rapper.monthly_listeners / 100 * delta.unsigned_abs() as u64;
    let monthly_listeners = if delta >= 0 {
        rapper.monthly_listeners.saturating_add(listeners_delta)
    } else {
        rapper.monthly_listeners.saturating_sub(listeners_delta)
    };

    AiRapper {
        popularity,
        monthly_listeners,
        total_streams: rapper.total_streams.saturating_add(weekly),
        ..rapper.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{ArtistId, Song, SongId, SongTier, Week};

    fn state_with_release() -> GameState {
        let mut state = GameState::new(77)
            .with_rappers(vec![AiRapper::new(ArtistId(1), "Nova", 50, 80_000)])
            .unwrap();
        let mut song = Song::recorded(SongId(1), "Opener", SongTier::Hit, vec![], Week::FIRST);
        song.release_date = Some(Week::FIRST);
        state.songs.push(song);
        state
    }

    #[test]
    fn simulation_is_pure_and_deterministic() {
        let config = GameConfig::default();
        let env = GameEnv::with_config(&config);
        let state = state_with_release();

        let a = simulate_week(&state, &env);
        let b = simulate_week(&state, &env);
        assert_eq!(a, b);
        assert_eq!(state, state_with_release());
    }

    #[test]
    fn staged_aggregates_are_consistent() {
        let config = GameConfig::default();
        let env = GameEnv::with_config(&config);
        let state = state_with_release();
        let staged = simulate_week(&state, &env);

        let song = &staged.songs[0];
        assert!(song.streams > 0);
        assert!(song.has_consistent_distribution());
        assert_eq!(song.last_week_streams, song.streams);
        assert_eq!(staged.summary.new_streams, song.streams);

        let platform_total: u64 = staged.streaming.iter().map(|p| p.total_streams).sum();
        assert_eq!(platform_total, song.streams);

        let revenue: u64 = staged.streaming.iter().map(|p| p.revenue).sum();
        assert_eq!(staged.summary.revenue, revenue);
        assert_eq!(staged.wealth, state.stats.wealth + revenue);

        assert!(staged.summary.new_followers > 0);
        assert!(staged.rappers[0].total_streams > 0);
    }

    #[test]
    fn release_week_skips_reclassification() {
        let config = GameConfig::default();
        let env = GameEnv::with_config(&config);
        let staged = simulate_week(&state_with_release(), &env);
        assert_eq!(staged.songs[0].performance, PerformanceType::Normal);
        assert!(staged.summary.viral_songs.is_empty());
    }

    #[test]
    fn empty_career_stages_zero_deltas() {
        let config = GameConfig::default();
        let env = GameEnv::with_config(&config);
        let state = GameState::new(1);
        let staged = simulate_week(&state, &env);

        assert_eq!(staged.summary.new_streams, 0);
        assert_eq!(staged.summary.new_followers, 0);
        assert_eq!(staged.summary.revenue, 0);
        assert_eq!(staged.wealth, state.stats.wealth);
    }
}
