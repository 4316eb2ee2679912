use crate::config::ClassificationConfig;
use crate::state::PerformanceType;

/// Next performance type for a song, given last week's and this week's
/// streams and how long it has held its current type.
pub fn reclassify(
    current: PerformanceType,
    last_week: u64,
    this_week: u64,
    weeks_in_status: u32,
    config: &ClassificationConfig,
) -> PerformanceType {
    use PerformanceType::*;

    let pct = (this_week as f64 - last_week as f64) / last_week.max(1) as f64;
    let settled = weeks_in_status > config.settle_weeks;

    if pct >= config.viral_threshold {
        return if current == Flop { Comeback } else { Viral };
    }
    if current == Flop && pct >= config.comeback_threshold {
        return Comeback;
    }
    if pct <= config.flop_threshold {
        return match current {
            Viral => Normal,
            Flop => Flop,
            _ if settled => Flop,
            other => other,
        };
    }
    if current == Viral && pct < config.viral_cooldown_threshold {
        return Normal;
    }
    if current == Comeback && weeks_in_status >= config.comeback_weeks {
        return Normal;
    }
    current
}
