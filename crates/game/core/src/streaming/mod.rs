//! Weekly stream accounting.
//!
//! - `growth`: per-song weekly stream function
//! - `classify`: viral / flop / comeback reclassification
//! - `distribution`: deterministic per-platform split of stream counts
mod classify;
mod distribution;
mod growth;

pub use classify::reclassify;
pub use distribution::{
    BiasVariant, MIN_PLATFORM_STREAMS, add_weekly_streams, ensure_distribution,
    generate_distribution,
};
pub use growth::{fan_factor, weekly_streams};

/// Converts a simulation float into a count.
///
/// NaN and negative values become zero; values past the `u64` range saturate.
pub(crate) fn saturating_u64(value: f64) -> u64 {
    if !value.is_finite() {
        return if value == f64::INFINITY { u64::MAX } else { 0 };
    }
    if value <= 0.0 {
        0
    } else if value >= u64::MAX as f64 {
        u64::MAX
    } else {
        value as u64
    }
}

#[cfg(test)]
mod tests {
    use super::saturating_u64;

    #[test]
    fn float_conversion_never_panics() {
        assert_eq!(saturating_u64(f64::NAN), 0);
        assert_eq!(saturating_u64(-3.5), 0);
        assert_eq!(saturating_u64(12.9), 12);
        assert_eq!(saturating_u64(f64::INFINITY), u64::MAX);
        assert_eq!(saturating_u64(1e30), u64::MAX);
    }
}
