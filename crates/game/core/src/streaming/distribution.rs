//! Per-platform stream distribution generator.
//!
//! A song's cumulative streams are split across the platforms it was released
//! on. The split is keyed by the song's identity, so regenerating it for the
//! same song and total always yields the same map.
use std::collections::BTreeSet;

use crate::env::char_code_seed;
use crate::state::{PlatformDistribution, Song, StreamingPlatformKind, Week};

use super::saturating_u64;

/// Floor applied to every platform's raw share before rescaling.
pub const MIN_PLATFORM_STREAMS: u64 = 10;

const PERTURBATION: f64 = 0.08;

/// Ceiling on a raw share, leaving room for the tie-break increments below.
const RAW_SHARE_CEILING: u64 = u64::MAX / 2;

/// Width of the per-platform bias band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiasVariant {
    /// `[0.6, 1.4]`, used when a song's distribution is first generated.
    Wide,
    /// `[0.7, 1.3]`, used for weekly increments.
    Narrow,
}

impl BiasVariant {
    const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Wide => (0.6, 1.4),
            Self::Narrow => (0.7, 1.3),
        }
    }

    fn bias(self, seed: u64) -> f64 {
        let (low, high) = self.bounds();
        low + (high - low) * ((seed % 1000) as f64 / 999.0)
    }
}

/// Splits `total` across `platforms` (every platform when empty).
///
/// The values of the returned map sum to exactly `total`.
pub fn generate_distribution(
    seed_key: &str,
    total: u64,
    platforms: &BTreeSet<StreamingPlatformKind>,
    variant: BiasVariant,
) -> PlatformDistribution {
    let selected: Vec<StreamingPlatformKind> = if platforms.is_empty() {
        StreamingPlatformKind::ALL.to_vec()
    } else {
        platforms.iter().copied().collect()
    };

    if total == 0 {
        return selected.into_iter().map(|kind| (kind, 0)).collect();
    }

    let share_sum: f64 = selected.iter().map(|kind| kind.market_share()).sum();
    let mut raw: Vec<(StreamingPlatformKind, u64)> = Vec::with_capacity(selected.len());

    for kind in selected {
        let seed = char_code_seed(&format!("{seed_key}:{}", kind.name()));
        let share = kind.market_share() / share_sum;
        let perturb = 1.0 + PERTURBATION * (seed as f64).sin();
        let value = total as f64 * share * variant.bias(seed) * perturb;

        let mut amount = saturating_u64(value.floor())
            .clamp(MIN_PLATFORM_STREAMS, RAW_SHARE_CEILING);
        while raw.iter().any(|(_, taken)| *taken == amount) {
            amount += 1;
        }
        raw.push((kind, amount));
    }

    rescale(&raw, total)
}

/// Scales raw shares down to `total`, handing the rounding remainder out one
/// unit at a time in descending raw order.
fn rescale(raw: &[(StreamingPlatformKind, u64)], total: u64) -> PlatformDistribution {
    let raw_sum: u128 = raw.iter().map(|(_, value)| u128::from(*value)).sum();
    let mut scaled: Vec<u64> = raw
        .iter()
        .map(|(_, value)| (u128::from(*value) * u128::from(total) / raw_sum) as u64)
        .collect();

    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by(|&a, &b| raw[b].1.cmp(&raw[a].1).then(a.cmp(&b)));

    let mut remainder = total - scaled.iter().sum::<u64>();
    for &index in order.iter().cycle() {
        if remainder == 0 {
            break;
        }
        scaled[index] += 1;
        remainder -= 1;
    }

    raw.iter()
        .zip(scaled)
        .map(|((kind, _), value)| (*kind, value))
        .collect()
}

/// Generates the song's distribution if it is missing or no longer sums to
/// the song's streams.
pub fn ensure_distribution(song: &mut Song) {
    if song.has_consistent_distribution() {
        return;
    }
    let distribution = generate_distribution(
        &song.distribution_key(),
        song.streams,
        &song.release_platforms,
        BiasVariant::Wide,
    );
    song.platform_stream_distribution = Some(distribution);
}

/// Adds a week's streams to the song and its distribution, keeping the two in
/// sync. Returns the per-platform increment.
///
/// `new_streams` is clamped to what the song's total can still hold, so the
/// increment's values sum to the streams actually added.
pub fn add_weekly_streams(song: &mut Song, week: Week, new_streams: u64) -> PlatformDistribution {
    ensure_distribution(song);
    let new_streams = new_streams.min(u64::MAX - song.streams);

    let key = format!("{}:w{}", song.distribution_key(), week.0);
    let increment =
        generate_distribution(&key, new_streams, &song.release_platforms, BiasVariant::Narrow);

    let distribution = song
        .platform_stream_distribution
        .get_or_insert_with(Default::default);
    for (kind, streams) in &increment {
        // each entry is at most `song.streams`, so this cannot overflow
        *distribution.entry(*kind).or_insert(0) += *streams;
    }
    song.streams += new_streams;
    increment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SongId, SongTier};

    fn platforms(kinds: &[StreamingPlatformKind]) -> BTreeSet<StreamingPlatformKind> {
        kinds.iter().copied().collect()
    }

    #[test]
    fn two_platform_release_sums_exactly() {
        let selected = platforms(&[
            StreamingPlatformKind::Spotify,
            StreamingPlatformKind::Soundcloud,
        ]);
        let map = generate_distribution("7:Night Drive", 100_000, &selected, BiasVariant::Wide);

        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&StreamingPlatformKind::Spotify));
        assert!(map.contains_key(&StreamingPlatformKind::Soundcloud));
        assert_eq!(map.values().sum::<u64>(), 100_000);
        assert!(map[&StreamingPlatformKind::Spotify] > map[&StreamingPlatformKind::Soundcloud]);
    }

    #[test]
    fn zero_total_maps_every_platform_to_zero() {
        let map = generate_distribution("1:x", 0, &BTreeSet::new(), BiasVariant::Wide);
        assert_eq!(map.len(), StreamingPlatformKind::ALL.len());
        assert!(map.values().all(|value| *value == 0));
    }

    #[test]
    fn small_totals_still_sum_exactly() {
        for total in [1, 7, 59, 61, 999] {
            let map = generate_distribution("2:tiny", total, &BTreeSet::new(), BiasVariant::Narrow);
            assert_eq!(map.values().sum::<u64>(), total, "total {total}");
        }
    }

    #[test]
    fn generation_is_deterministic_per_key() {
        let all = BTreeSet::new();
        let a = generate_distribution("3:Same", 54_321, &all, BiasVariant::Wide);
        let b = generate_distribution("3:Same", 54_321, &all, BiasVariant::Wide);
        assert_eq!(a, b);
    }

    #[test]
    fn weekly_increments_keep_the_sum_invariant() {
        let mut song = Song::recorded(SongId(4), "Grind", SongTier::Solid, vec![], Week(1));
        song.release_date = Some(Week(1));

        for week in 1..=6 {
            add_weekly_streams(&mut song, Week(week), 1_000 * u64::from(week) + 13);
            assert!(song.has_consistent_distribution());
        }
        assert_eq!(song.streams, 21_000 + 6 * 13);
    }

    #[test]
    fn increments_near_the_ceiling_stay_consistent() {
        let mut song = Song::recorded(SongId(6), "Forever", SongTier::Classic, vec![], Week(1));
        song.release_date = Some(Week(1));
        song.streams = u64::MAX - 500;

        let increment = add_weekly_streams(&mut song, Week(2), 10_000);
        assert_eq!(song.streams, u64::MAX);
        assert_eq!(increment.values().sum::<u64>(), 500);
        assert!(song.has_consistent_distribution());

        let increment = add_weekly_streams(&mut song, Week(3), 10_000);
        assert!(increment.values().all(|streams| *streams == 0));
        assert!(song.has_consistent_distribution());
    }

    #[test]
    fn huge_totals_still_sum_exactly() {
        let map = generate_distribution("8:Max", u64::MAX, &BTreeSet::new(), BiasVariant::Wide);
        assert_eq!(
            map.values().try_fold(0u64, |acc, value| acc.checked_add(*value)),
            Some(u64::MAX)
        );
    }

    #[test]
    fn inconsistent_distribution_is_regenerated() {
        let mut song = Song::recorded(SongId(5), "Stale", SongTier::Demo, vec![], Week(1));
        song.streams = 5_000;
        song.platform_stream_distribution =
            Some([(StreamingPlatformKind::Spotify, 10)].into_iter().collect());

        ensure_distribution(&mut song);
        assert!(song.has_consistent_distribution());
        assert_eq!(
            song.platform_stream_distribution.as_ref().map(|map| map.len()),
            Some(StreamingPlatformKind::ALL.len())
        );
    }
}
