/// Simulation constants and tunable parameters.
///
/// Every field is data-driven; `GameConfig::default()` mirrors the shipped
/// `config.toml` in the content crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Wealth charged for recording a song.
    pub recording_cost: u64,
    pub starting_wealth: u64,
    pub starting_reputation: u8,
    pub starting_creativity: u8,
    pub starting_marketing: u8,
    pub starting_networking: u8,
    pub starting_fan_loyalty: u8,

    pub growth: GrowthConfig,
    pub classification: ClassificationConfig,
    pub events: EventConfig,

    /// Followers gained per new stream, before the marketing multiplier.
    pub follower_rate: f64,
    /// Radius of the "nearby artists" window around the player's rank.
    pub nearby_window: usize,
}

/// Constants for the weekly stream growth function.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthConfig {
    /// Peak extra multiplier for a freshly viral song (`1 + boost`).
    pub viral_boost: f64,
    /// Per-week decay applied to the viral boost.
    pub viral_decay: f64,
    pub flop_multiplier: f64,
    pub comeback_multiplier: f64,
    /// Half-width of the normal drift band around 1.0.
    pub normal_drift: f64,
    /// Per-week catalog age decay.
    pub age_decay: f64,
    /// Floor for the age decay factor.
    pub age_decay_floor: f64,
    pub spike_multiplier: f64,
    pub spike_base_chance: f64,
    pub slump_multiplier: f64,
    pub slump_chance: f64,
    pub recovery_multiplier: f64,
    pub recovery_base_chance: f64,
    /// Extra fan factor per featured artist.
    pub feature_bonus: f64,
}

/// Week-over-week change thresholds used to reclassify songs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassificationConfig {
    pub viral_threshold: f64,
    pub comeback_threshold: f64,
    pub flop_threshold: f64,
    pub viral_cooldown_threshold: f64,
    /// Weeks a comeback lasts before the song settles back to normal.
    pub comeback_weeks: u32,
    /// Weeks after a classification change during which a song cannot flop.
    pub settle_weeks: u32,
}

/// Weekly random-event trigger probabilities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventConfig {
    pub feature_request_base: f64,
    pub feature_request_per_level: f64,
    pub ai_track_min_reputation: u8,
    pub ai_track_base: f64,
    pub ai_track_per_reputation: f64,
    pub pool_chance: f64,
}

impl GameConfig {
    pub const DEFAULT_RECORDING_COST: u64 = 500;
    pub const DEFAULT_FOLLOWER_RATE: f64 = 0.002;
    pub const DEFAULT_NEARBY_WINDOW: usize = 1;

    pub fn new() -> Self {
        Self {
            recording_cost: Self::DEFAULT_RECORDING_COST,
            starting_wealth: 10_000,
            starting_reputation: 10,
            starting_creativity: 20,
            starting_marketing: 10,
            starting_networking: 10,
            starting_fan_loyalty: 10,
            growth: GrowthConfig::default(),
            classification: ClassificationConfig::default(),
            events: EventConfig::default(),
            follower_rate: Self::DEFAULT_FOLLOWER_RATE,
            nearby_window: Self::DEFAULT_NEARBY_WINDOW,
        }
    }

    /// Same config with every random-event trigger disabled.
    pub fn without_events(mut self) -> Self {
        self.events = EventConfig::disabled();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            viral_boost: 2.0,
            viral_decay: 0.7,
            flop_multiplier: 0.3,
            comeback_multiplier: 0.75,
            normal_drift: 0.1,
            age_decay: 0.9,
            age_decay_floor: 0.05,
            spike_multiplier: 2.5,
            spike_base_chance: 0.02,
            slump_multiplier: 0.4,
            slump_chance: 0.03,
            recovery_multiplier: 2.5,
            recovery_base_chance: 0.05,
            feature_bonus: 0.15,
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            viral_threshold: 0.60,
            comeback_threshold: 0.25,
            flop_threshold: -0.40,
            viral_cooldown_threshold: -0.15,
            comeback_weeks: 3,
            settle_weeks: 1,
        }
    }
}

impl EventConfig {
    pub fn disabled() -> Self {
        Self {
            feature_request_base: 0.0,
            feature_request_per_level: 0.0,
            ai_track_min_reputation: 20,
            ai_track_base: 0.0,
            ai_track_per_reputation: 0.0,
            pool_chance: 0.0,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            feature_request_base: 0.10,
            feature_request_per_level: 0.02,
            ai_track_min_reputation: 20,
            ai_track_base: 0.05,
            ai_track_per_reputation: 0.05,
            pool_chance: 0.05,
        }
    }
}
