use tracing::debug;

use crate::env::{GameEnv, compute_seed, roll};
use crate::state::{ActiveEvent, ArtistId, Effect, EventTemplate, GameState};

use super::catalog::{AI_TRACK_FEATURE_ID, FEATURE_REQUEST_ID, RAPPER_PLACEHOLDER, is_dynamic};
use super::eligibility::is_eligible_in;

/// Branch of the weekly draw that produced (or failed to produce) an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawBranch {
    FeatureRequest,
    AiTrackFeature,
    Pool,
}

/// Weekly random-event draw.
///
/// Only the first branch whose guard matches is tried:
/// 1. career level >= 1: feature request
/// 2. reputation at or above the AI-track threshold: AI-track feature
/// 3. otherwise: flat chance over the eligible static pool
pub struct EventSelector<'a> {
    state: &'a GameState,
    env: GameEnv<'a>,
}

impl<'a> EventSelector<'a> {
    pub fn new(state: &'a GameState, env: GameEnv<'a>) -> Self {
        Self { state, env }
    }

    /// Which branch this week's draw takes.
    pub fn branch(&self) -> DrawBranch {
        let stats = &self.state.stats;
        if stats.career_level >= 1 {
            DrawBranch::FeatureRequest
        } else if stats.reputation >= self.env.config().events.ai_track_min_reputation {
            DrawBranch::AiTrackFeature
        } else {
            DrawBranch::Pool
        }
    }

    /// Trigger probability of the branch taken this week.
    ///
    /// The feature-request probability is not capped; values at or above 1
    /// always fire.
    pub fn trigger_probability(&self) -> f64 {
        let config = &self.env.config().events;
        let stats = &self.state.stats;
        match self.branch() {
            DrawBranch::FeatureRequest => {
                config.feature_request_base
                    + config.feature_request_per_level * f64::from(stats.career_level)
            }
            DrawBranch::AiTrackFeature => {
                config.ai_track_base
                    + config.ai_track_per_reputation * (f64::from(stats.reputation) / 100.0)
            }
            DrawBranch::Pool => config.pool_chance,
        }
    }

    /// Rolls this week's event. Returns the instance to activate, if any.
    pub fn draw(&self) -> Option<ActiveEvent> {
        if self.state.has_unresolved_events() {
            debug!("event draw skipped: an event is still active");
            return None;
        }

        let branch = self.branch();
        let probability = self.trigger_probability();
        if !self
            .env
            .rng()
            .chance(self.seed(0, roll::EVENT_TRIGGER), probability)
        {
            debug!(?branch, probability, "event draw missed");
            return None;
        }

        let event = match branch {
            DrawBranch::FeatureRequest => self.instantiate_dynamic(FEATURE_REQUEST_ID),
            DrawBranch::AiTrackFeature => self.instantiate_dynamic(AI_TRACK_FEATURE_ID),
            DrawBranch::Pool => self.pick_from_pool(),
        };
        debug!(?branch, event = ?event.as_ref().map(|e| &e.id), "event draw hit");
        event
    }

    fn seed(&self, subject: u32, context: u32) -> u64 {
        compute_seed(
            self.state.game_seed,
            u64::from(self.state.week.0),
            subject,
            context,
        )
    }

    fn instantiate_dynamic(&self, template_id: &str) -> Option<ActiveEvent> {
        let template = self.state.event_template(template_id)?;
        let instance_id = format!("{template_id}-w{}", self.state.week.0);
        if !is_eligible_in(self.state, &instance_id, &template.requires_stats) {
            return None;
        }
        let subject = self.pick_subject()?;
        self.instantiate(template, instance_id, Some(subject))
    }

    fn pick_from_pool(&self) -> Option<ActiveEvent> {
        let eligible: Vec<&EventTemplate> = self
            .state
            .event_pool
            .iter()
            .filter(|template| !is_dynamic(&template.id))
            .filter(|template| is_eligible_in(self.state, &template.id, &template.requires_stats))
            .collect();

        let index = self
            .env
            .rng()
            .pick(self.seed(0, roll::EVENT_PICK), eligible.len())?;
        let template = eligible[index];

        let subject = if needs_subject(template) {
            Some(self.pick_subject()?)
        } else {
            None
        };
        self.instantiate(template, template.id.clone(), subject)
    }

    /// Seeded pick among rappers who are not enemies of the player.
    fn pick_subject(&self) -> Option<ArtistId> {
        let candidates: Vec<ArtistId> = self
            .state
            .rappers
            .iter()
            .filter(|rapper| rapper.is_approachable())
            .map(|rapper| rapper.id)
            .collect();
        let index = self
            .env
            .rng()
            .pick(self.seed(0, roll::EVENT_SUBJECT), candidates.len())?;
        Some(candidates[index])
    }

    fn instantiate(
        &self,
        template: &EventTemplate,
        id: String,
        subject: Option<ArtistId>,
    ) -> Option<ActiveEvent> {
        let name = match subject {
            Some(artist) => self.state.rapper(artist)?.name.as_str(),
            None => "",
        };
        Some(ActiveEvent {
            id,
            template_id: template.id.clone(),
            kind: template.kind(),
            title: template.title.replace(RAPPER_PLACEHOLDER, name),
            description: template.description.replace(RAPPER_PLACEHOLDER, name),
            week: self.state.week,
            subject,
            resolved: false,
        })
    }
}

/// True when any option of the template acts on a subject rapper.
fn needs_subject(template: &EventTemplate) -> bool {
    template.title.contains(RAPPER_PLACEHOLDER)
        || template.options.iter().flat_map(|option| &option.effects).any(|effect| {
            matches!(
                effect,
                Effect::SetRelationship { .. }
                    | Effect::AdjustRapperPopularity { .. }
                    | Effect::ReleaseFeatureSong { .. }
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::RngOracle;
    use crate::events::default_pool;
    use crate::state::{AiRapper, RelationshipStatus, Week};

    /// Always rolls zero: every chance with a positive probability succeeds.
    struct AlwaysHit;

    impl RngOracle for AlwaysHit {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    fn career_state() -> GameState {
        GameState::new(11)
            .with_rappers(vec![
                AiRapper::new(ArtistId(1), "Nova", 40, 50_000),
                AiRapper::new(ArtistId(2), "Kilo", 60, 90_000),
            ])
            .and_then(|state| state.with_event_pool(default_pool()))
            .unwrap()
    }

    #[test]
    fn career_level_takes_the_feature_request_branch() {
        let config = GameConfig::default();
        let mut state = career_state();
        state.stats.career_level = 2;
        state.week = Week(4);

        let selector = EventSelector::new(&state, GameEnv::new(&config, &AlwaysHit));
        assert_eq!(selector.branch(), DrawBranch::FeatureRequest);
        assert!((selector.trigger_probability() - 0.14).abs() < 1e-9);

        let event = selector.draw().unwrap();
        assert_eq!(event.id, "feature_request-w4");
        assert_eq!(event.template_id, FEATURE_REQUEST_ID);
        assert_eq!(event.subject, Some(ArtistId(1)));
        assert_eq!(event.title, "Nova wants you on a track");
    }

    #[test]
    fn feature_request_probability_is_uncapped() {
        let config = GameConfig::default();
        let mut state = career_state();
        state.stats.career_level = 50;
        let selector = EventSelector::new(&state, GameEnv::with_config(&config));
        assert!(selector.trigger_probability() > 1.0);
        assert!(selector.draw().is_some());
    }

    #[test]
    fn reputation_takes_the_ai_track_branch() {
        let config = GameConfig::default();
        let mut state = career_state();
        state.stats.reputation = 85;

        let selector = EventSelector::new(&state, GameEnv::new(&config, &AlwaysHit));
        assert_eq!(selector.branch(), DrawBranch::AiTrackFeature);
        assert!((selector.trigger_probability() - 0.0925).abs() < 1e-9);
        assert_eq!(
            selector.draw().map(|event| event.template_id),
            Some(AI_TRACK_FEATURE_ID.to_string())
        );
    }

    #[test]
    fn enemies_are_never_subjects() {
        let config = GameConfig::default();
        let mut state = career_state();
        state.stats.career_level = 1;
        for rapper in &mut state.rappers {
            rapper.relationship = RelationshipStatus::Enemy;
        }
        let selector = EventSelector::new(&state, GameEnv::new(&config, &AlwaysHit));
        assert_eq!(selector.draw(), None);
    }

    #[test]
    fn pool_branch_excludes_dynamic_and_resolved_templates() {
        let config = GameConfig::default();
        let mut state = career_state();
        state.stats.reputation = 0;
        state.resolved_event_ids.push("beef_with_rival".into());

        let event = EventSelector::new(&state, GameEnv::new(&config, &AlwaysHit))
            .draw()
            .unwrap();
        assert!(!is_dynamic(&event.template_id));
        assert_ne!(event.id, "beef_with_rival");
    }

    #[test]
    fn draw_is_skipped_while_an_event_is_active() {
        let config = GameConfig::default();
        let mut state = career_state();
        state.stats.career_level = 3;
        let first = EventSelector::new(&state, GameEnv::new(&config, &AlwaysHit))
            .draw()
            .unwrap();
        state.active_events.push(first);

        let selector = EventSelector::new(&state, GameEnv::new(&config, &AlwaysHit));
        assert_eq!(selector.draw(), None);
    }
}
