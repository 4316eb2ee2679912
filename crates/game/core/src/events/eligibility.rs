use std::collections::BTreeMap;

use crate::state::{ActiveEvent, CharacterStats, GameState, StatKind};

/// True when the event instance is neither active nor resolved and the
/// player meets every stat requirement.
pub fn is_eligible(
    id: &str,
    requires_stats: &BTreeMap<StatKind, u32>,
    stats: &CharacterStats,
    active: &[ActiveEvent],
    resolved: &[String],
) -> bool {
    !active.iter().any(|event| event.id == id)
        && !resolved.iter().any(|seen| seen == id)
        && stats.satisfies(requires_stats)
}

/// [`is_eligible`] against the live collections of `state`.
pub(crate) fn is_eligible_in(
    state: &GameState,
    id: &str,
    requires_stats: &BTreeMap<StatKind, u32>,
) -> bool {
    is_eligible(
        id,
        requires_stats,
        &state.stats,
        &state.active_events,
        &state.resolved_event_ids,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::catalog::{self, AI_TRACK_FEATURE_ID, FEATURE_REQUEST_ID};

    fn requirements(id: &str) -> BTreeMap<StatKind, u32> {
        catalog::default_pool()
            .into_iter()
            .find(|template| template.id == id)
            .map(|template| template.requires_stats)
            .unwrap_or_default()
    }

    #[test]
    fn reputation_without_career_level_unlocks_only_the_ai_track() {
        let stats = CharacterStats {
            career_level: 0,
            reputation: 85,
            ..CharacterStats::default()
        };

        assert!(is_eligible(
            AI_TRACK_FEATURE_ID,
            &requirements(AI_TRACK_FEATURE_ID),
            &stats,
            &[],
            &[],
        ));
        assert!(!is_eligible(
            FEATURE_REQUEST_ID,
            &requirements(FEATURE_REQUEST_ID),
            &stats,
            &[],
            &[],
        ));
    }

    #[test]
    fn resolved_ids_are_never_eligible_again() {
        let stats = CharacterStats::default();
        let resolved = vec!["studio_session".to_string()];
        assert!(!is_eligible(
            "studio_session",
            &BTreeMap::new(),
            &stats,
            &[],
            &resolved
        ));
        assert!(is_eligible("radio_interview", &BTreeMap::new(), &stats, &[], &resolved));
    }
}
