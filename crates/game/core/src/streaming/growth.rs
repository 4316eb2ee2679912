use crate::config::GrowthConfig;
use crate::env::{RngOracle, compute_seed, roll};
use crate::state::{CharacterStats, PerformanceType, Song, Week};

use super::saturating_u64;

/// Audience multiplier shared by every song of the player.
pub fn fan_factor(stats: &CharacterStats, featuring: usize, config: &GrowthConfig) -> f64 {
    1.0 + f64::from(stats.fan_loyalty) / 100.0
        + f64::from(stats.marketing) / 200.0
        + featuring as f64 * config.feature_bonus
}

/// Streams `song` gains during `week`.
///
/// Unreleased or inactive songs gain nothing. Every roll is seeded by
/// `(game_seed, week, song id, purpose)`.
pub fn weekly_streams(
    song: &Song,
    stats: &CharacterStats,
    week: Week,
    game_seed: u64,
    config: &GrowthConfig,
    rng: &dyn RngOracle,
) -> u64 {
    if !song.is_streaming() {
        return 0;
    }

    let age = song.weeks_since_release(week);
    let age_decay = config
        .age_decay
        .powi(age.min(i32::MAX as u32) as i32)
        .max(config.age_decay_floor);
    let base = song.tier.base_weekly_streams() as f64
        * fan_factor(stats, song.featuring.len(), config)
        * age_decay;

    let seed = |context| compute_seed(game_seed, u64::from(week.0), song.id.0, context);

    let multiplier = match song.performance {
        PerformanceType::Viral => {
            let weeks = song.weeks_in_status(week).min(i32::MAX as u32) as i32;
            1.0 + config.viral_boost * config.viral_decay.powi(weeks)
        }
        PerformanceType::Flop => {
            let recovery_chance =
                config.recovery_base_chance + f64::from(stats.fan_loyalty) / 500.0;
            if rng.chance(seed(roll::RECOVERY), recovery_chance) {
                config.flop_multiplier * config.recovery_multiplier
            } else {
                config.flop_multiplier
            }
        }
        PerformanceType::Comeback => config.comeback_multiplier,
        PerformanceType::Normal => {
            let drift = rng.range_f64(
                seed(roll::DRIFT),
                1.0 - config.normal_drift,
                1.0 + config.normal_drift,
            );
            let spike_chance = config.spike_base_chance + f64::from(stats.creativity) / 2000.0;
            if rng.chance(seed(roll::SPIKE), spike_chance) {
                drift * config.spike_multiplier
            } else if rng.chance(seed(roll::SLUMP), config.slump_chance) {
                drift * config.slump_multiplier
            } else {
                drift
            }
        }
    };

    saturating_u64(base * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{SongId, SongTier};

    /// Scripted generator returning a fixed word.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn released(tier: SongTier, week: u32) -> Song {
        let mut song = Song::recorded(SongId(1), "Track", tier, vec![], Week(week));
        song.release_date = Some(Week(week));
        song
    }

    fn quiet_stats() -> CharacterStats {
        CharacterStats {
            fan_loyalty: 0,
            marketing: 0,
            creativity: 0,
            ..CharacterStats::default()
        }
    }

    #[test]
    fn unreleased_song_gains_nothing() {
        let song = Song::recorded(SongId(1), "Draft", SongTier::Hit, vec![], Week(1));
        let streams = weekly_streams(
            &song,
            &quiet_stats(),
            Week(3),
            1,
            &GrowthConfig::default(),
            &PcgRng,
        );
        assert_eq!(streams, 0);
    }

    #[test]
    fn normal_song_drifts_around_base() {
        // Word u32::MAX/2 gives unit ~0.5: drift 1.0, no spike, no slump.
        let rng = Fixed(u32::MAX / 2);
        let song = released(SongTier::Solid, 1);
        let streams = weekly_streams(
            &song,
            &quiet_stats(),
            Week(1),
            1,
            &GrowthConfig::default(),
            &rng,
        );
        assert!((7_990..=8_010).contains(&streams), "got {streams}");
    }

    #[test]
    fn viral_boost_decays_with_status_age() {
        let config = GrowthConfig::default();
        let mut song = released(SongTier::Demo, 1);
        song.performance = PerformanceType::Viral;
        song.performance_status_week = Week(1);

        let fresh = weekly_streams(&song, &quiet_stats(), Week(1), 1, &config, &PcgRng);
        song.release_date = Some(Week(3));
        let later = weekly_streams(&song, &quiet_stats(), Week(3), 1, &config, &PcgRng);

        assert_eq!(fresh, 1_500);
        assert!(later < fresh);
    }

    #[test]
    fn fan_factor_rewards_features() {
        let config = GrowthConfig::default();
        let stats = quiet_stats();
        assert!(fan_factor(&stats, 2, &config) > fan_factor(&stats, 0, &config));
    }

    #[test]
    fn old_songs_bottom_out_at_the_decay_floor() {
        let rng = Fixed(u32::MAX / 2);
        let song = released(SongTier::Classic, 1);
        let streams = weekly_streams(
            &song,
            &quiet_stats(),
            Week(500),
            1,
            &GrowthConfig::default(),
            &rng,
        );
        assert!((2_990..=3_010).contains(&streams), "got {streams}");
    }
}
