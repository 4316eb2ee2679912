//! Player character statistics.

/// Upper bound for percentage-like stats.
pub const STAT_MAX: u8 = 100;

/// Player character statistics.
///
/// Percentage-like stats live in `[0, 100]`; wealth never goes below zero.
/// Mutate through [`crate::engine::StatsReducer`] so the clamps hold.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub wealth: u64,
    pub reputation: u8,
    pub creativity: u8,
    pub marketing: u8,
    pub networking: u8,
    pub fan_loyalty: u8,
    /// Derived from cumulative streams, refreshed on every week commit.
    pub career_level: u32,
}

impl CharacterStats {
    /// Reads a stat as an unsigned threshold-comparable value.
    pub fn get(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::Wealth => self.wealth,
            StatKind::Reputation => u64::from(self.reputation),
            StatKind::Creativity => u64::from(self.creativity),
            StatKind::Marketing => u64::from(self.marketing),
            StatKind::Networking => u64::from(self.networking),
            StatKind::FanLoyalty => u64::from(self.fan_loyalty),
            StatKind::CareerLevel => u64::from(self.career_level),
        }
    }

    /// True when every `(stat, minimum)` pair is met.
    pub fn satisfies<'a, I>(&self, requirements: I) -> bool
    where
        I: IntoIterator<Item = (&'a StatKind, &'a u32)>,
    {
        requirements
            .into_iter()
            .all(|(kind, minimum)| self.get(*kind) >= u64::from(*minimum))
    }
}

/// Career level for a cumulative stream count: `floor(sqrt(streams / 10_000))`.
pub fn career_level_for(total_streams: u64) -> u32 {
    let units = total_streams / 10_000;
    // integer sqrt, exact for all u64
    let mut level = (units as f64).sqrt() as u64;
    while level * level > units {
        level -= 1;
    }
    while (level + 1) * (level + 1) <= units {
        level += 1;
    }
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Stat names used by event requirements and effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Wealth,
    Reputation,
    Creativity,
    Marketing,
    Networking,
    FanLoyalty,
    CareerLevel,
}

impl StatKind {
    /// Percentage-like stats clamp to `[0, 100]`.
    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            Self::Reputation
                | Self::Creativity
                | Self::Marketing
                | Self::Networking
                | Self::FanLoyalty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn career_level_thresholds() {
        assert_eq!(career_level_for(0), 0);
        assert_eq!(career_level_for(9_999), 0);
        assert_eq!(career_level_for(10_000), 1);
        assert_eq!(career_level_for(39_999), 1);
        assert_eq!(career_level_for(40_000), 2);
        assert_eq!(career_level_for(1_000_000), 10);
        assert_eq!(career_level_for(20_250_000), 45);
    }

    #[test]
    fn satisfies_checks_every_requirement() {
        let stats = CharacterStats {
            reputation: 85,
            ..Default::default()
        };
        let mut needs = BTreeMap::new();
        needs.insert(StatKind::Reputation, 20);
        assert!(stats.satisfies(&needs));

        needs.insert(StatKind::CareerLevel, 1);
        assert!(!stats.satisfies(&needs));
    }

    #[test]
    fn stat_kind_parses_snake_case() {
        assert_eq!("fan_loyalty".parse::<StatKind>().ok(), Some(StatKind::FanLoyalty));
        assert_eq!("Career_Level".parse::<StatKind>().ok(), Some(StatKind::CareerLevel));
        assert!(StatKind::Reputation.is_percentage());
        assert!(!StatKind::Wealth.is_percentage());
    }
}
