use tracing::debug;

use crate::engine::{EngineError, StateReducer};
use crate::env::GameEnv;
use crate::state::{ActiveEvent, EventOption, GameState};

use super::CommandTransition;

/// Picks an option for an active event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveEvent {
    pub event_id: String,
    pub option: usize,
}

impl ResolveEvent {
    pub fn new(event_id: impl Into<String>, option: usize) -> Self {
        Self {
            event_id: event_id.into(),
            option,
        }
    }

    fn chosen<'s>(
        &self,
        state: &'s GameState,
    ) -> Result<(&'s ActiveEvent, &'s EventOption), EngineError> {
        if state.is_resolved(&self.event_id) {
            return Err(EngineError::AlreadyResolved(self.event_id.clone()));
        }
        let event = state
            .active_event(&self.event_id)
            .ok_or_else(|| EngineError::UnknownEvent(self.event_id.clone()))?;
        let template = state
            .event_template(&event.template_id)
            .ok_or_else(|| EngineError::UnknownEvent(event.template_id.clone()))?;
        let option = template
            .options
            .get(self.option)
            .ok_or_else(|| EngineError::InvalidOption {
                event_id: self.event_id.clone(),
                index: self.option,
            })?;
        Ok((event, option))
    }
}

impl CommandTransition for ResolveEvent {
    type Output = ActiveEvent;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        self.chosen(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
    ) -> Result<ActiveEvent, EngineError> {
        let (event, option) = self.chosen(state)?;
        let next = option.apply_with(state, event.subject);
        *state = next;

        let resolved = StateReducer::new(state)
            .events()
            .resolve(&self.event_id)
            .ok_or_else(|| EngineError::UnknownEvent(self.event_id.clone()))?;

        debug!(event = %resolved.id, option = self.option, "event resolved");
        Ok(resolved)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        let occurrences = state
            .resolved_event_ids
            .iter()
            .filter(|id| **id == self.event_id)
            .count();
        if occurrences == 1 && state.active_event(&self.event_id).is_none() {
            Ok(())
        } else {
            Err(EngineError::InvariantViolation(
                "a resolved event must be recorded exactly once and leave the active list",
            ))
        }
    }
}
