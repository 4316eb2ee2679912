//! Command execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! player command, weekly advancement included, flows through the same
//! three-phase transition: `pre_validate → apply → post_validate`.
mod errors;
mod reducer;
mod simulate;

pub use errors::{AlbumRuleViolation, EngineError, TransitionPhase};
pub use reducer::{
    EventsReducer, RappersReducer, SocialReducer, SongsReducer, StateReducer, StatsReducer,
    WeekReducer,
};
pub use simulate::simulate_week;

use tracing::{debug, warn};

use crate::command::{
    BeginWeek, Command, CommandOutcome, CommandTransition, CommitWeek, DeactivateSong,
    PostOnSocialMedia, RecordSong, ReleaseAlbum, ReleaseSong, ResolveEvent, WeekReport,
};
use crate::env::GameEnv;
use crate::state::{ActiveEvent, AlbumId, GameState, SocialPost, SongId, WeeklySummary};

/// Drives a transition through its three phases.
///
/// A failure in `pre_validate` leaves the state untouched. Failures in the
/// later phases are logged with the phase they came from.
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Output, (TransitionPhase, EngineError)>
where
    T: CommandTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| (TransitionPhase::PreValidate, error))?;

    let output = transition
        .apply(state, env)
        .map_err(|error| (TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| (TransitionPhase::PostValidate, error))?;

    Ok(output)
}

/// Game engine that executes commands against a borrowed state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Routes a serialized command to its transition.
    pub fn execute(&mut self, command: &Command) -> Result<CommandOutcome, EngineError> {
        match command {
            Command::BeginWeek => self.begin_week().map(CommandOutcome::WeekStaged),
            Command::CommitWeek => self.commit_week().map(CommandOutcome::WeekCommitted),
            Command::AdvanceWeek => self.advance_week().map(CommandOutcome::WeekCommitted),
            Command::ResolveEvent(command) => {
                self.run(command)
                    .map(|event| CommandOutcome::EventResolved {
                        event,
                        option: command.option,
                    })
            }
            Command::RecordSong(command) => self.run(command).map(CommandOutcome::SongRecorded),
            Command::ReleaseSong(command) => self.run(command).map(CommandOutcome::SongReleased),
            Command::ReleaseAlbum(command) => self.run(command).map(CommandOutcome::AlbumReleased),
            Command::DeactivateSong(command) => {
                self.run(command)
                    .map(|changed| CommandOutcome::SongDeactivated {
                        song: command.song,
                        changed,
                    })
            }
            Command::PostOnSocialMedia(command) => self.run(command).map(CommandOutcome::Posted),
        }
    }

    /// Stages the coming week and returns its summary.
    pub fn begin_week(&mut self) -> Result<WeeklySummary, EngineError> {
        self.run(&BeginWeek)
    }

    /// Applies the staged week, then draws the new week's event.
    pub fn commit_week(&mut self) -> Result<WeekReport, EngineError> {
        self.run(&CommitWeek)
    }

    /// Begin followed by commit, with no chance to inspect the summary.
    pub fn advance_week(&mut self) -> Result<WeekReport, EngineError> {
        self.begin_week()?;
        self.commit_week()
    }

    pub fn resolve_event(
        &mut self,
        event_id: impl Into<String>,
        option: usize,
    ) -> Result<ActiveEvent, EngineError> {
        self.run(&ResolveEvent::new(event_id, option))
    }

    pub fn record_song(&mut self, command: &RecordSong) -> Result<SongId, EngineError> {
        self.run(command)
    }

    pub fn release_song(&mut self, command: &ReleaseSong) -> Result<SongId, EngineError> {
        self.run(command)
    }

    pub fn release_album(&mut self, command: &ReleaseAlbum) -> Result<AlbumId, EngineError> {
        self.run(command)
    }

    /// Returns whether the song was active before the call.
    pub fn deactivate_song(&mut self, song: SongId) -> Result<bool, EngineError> {
        self.run(&DeactivateSong { song })
    }

    pub fn post_on_social_media(
        &mut self,
        command: &PostOnSocialMedia,
    ) -> Result<SocialPost, EngineError> {
        self.run(command)
    }

    fn run<T: CommandTransition>(&mut self, transition: &T) -> Result<T::Output, EngineError> {
        match drive_transition(transition, self.state, &self.env) {
            Ok(output) => {
                self.state.nonce += 1;
                Ok(output)
            }
            Err((phase, error)) => {
                if phase == TransitionPhase::PreValidate {
                    debug!(phase = phase.as_str(), %error, "command rejected");
                } else {
                    warn!(
                        phase = phase.as_str(),
                        nonce = self.state.nonce,
                        %error,
                        "command failed after validation"
                    );
                }
                Err(error)
            }
        }
    }
}
