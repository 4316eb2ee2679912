//! Simulation worker that owns the authoritative [`rapsim_core::GameState`].
//!
//! Receives commands from [`crate::SessionHandle`], executes them via
//! [`rapsim_core::GameEngine`], and publishes events to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use rapsim_core::{
    Command, CommandOutcome, EngineError, GameConfig, GameEngine, GameEnv, GameError, GameState,
};

use crate::api::Result;
use crate::events::{EventBus, RandomEventUpdate, SessionEvent, SocialEvent, WeekEvent};

/// Requests the simulation worker understands.
pub enum WorkerCommand {
    /// Run one gameplay command.
    Execute {
        command: Command,
        reply: oneshot::Sender<Result<CommandOutcome>>,
    },
    /// Query the current game state (read-only).
    Snapshot { reply: oneshot::Sender<GameState> },
    /// Replace the whole state, e.g. after loading a save.
    ReplaceState {
        state: Box<GameState>,
        reply: oneshot::Sender<()>,
    },
    /// Stop the worker loop even if handles are still alive.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes gameplay commands.
///
/// Commands run against a staging clone of the state; the clone replaces the
/// authoritative state only when the engine reports success.
pub struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    command_rx: mpsc::Receiver<WorkerCommand>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        config: GameConfig,
        command_rx: mpsc::Receiver<WorkerCommand>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            "SimulationWorker initialized at {} with {} songs and {} rappers",
            state.week,
            state.songs.len(),
            state.rappers.len()
        );

        Self {
            state,
            config,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd) {
                break;
            }
        }
        debug!("SimulationWorker stopped");
    }

    /// Returns `false` once the worker should stop.
    fn handle_command(&mut self, cmd: WorkerCommand) -> bool {
        match cmd {
            WorkerCommand::Execute { command, reply } => {
                let result = self.execute(&command);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Snapshot { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::ReplaceState { state, reply } => {
                info!("Replacing session state ({})", state.week);
                self.state = *state;
                if reply.send(()).is_err() {
                    debug!("ReplaceState reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Shutdown { reply } => {
                let _ = reply.send(());
                return false;
            }
        }
        true
    }

    fn execute(&mut self, command: &Command) -> Result<CommandOutcome> {
        let mut staging = self.state.clone();
        let env = GameEnv::with_config(&self.config);

        let outcome = GameEngine::new(&mut staging, env)
            .execute(command)
            .inspect_err(|error| log_rejection(command, error))?;

        self.state = staging;
        self.publish(&outcome);
        Ok(outcome)
    }

    fn publish(&self, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::WeekStaged(summary) => {
                self.event_bus
                    .publish(SessionEvent::Week(WeekEvent::Staged {
                        summary: summary.clone(),
                    }));
            }
            CommandOutcome::WeekCommitted(report) => {
                info!(
                    "{} committed: +{} streams, +{} followers, +${}",
                    self.state.week,
                    report.summary.new_streams,
                    report.summary.new_followers,
                    report.summary.revenue
                );
                self.event_bus
                    .publish(SessionEvent::Week(WeekEvent::Committed {
                        week: self.state.week,
                        summary: report.summary.clone(),
                        career_level: self.state.stats.career_level,
                    }));

                if let Some(event) = &report.triggered_event {
                    info!("Event triggered: {} ({})", event.title, event.id);
                    self.event_bus
                        .publish(SessionEvent::RandomEvent(RandomEventUpdate::Triggered(
                            event.clone(),
                        )));
                }
            }
            CommandOutcome::EventResolved { event, option } => {
                info!("Event resolved: {} with option {}", event.id, option);
                self.event_bus
                    .publish(SessionEvent::RandomEvent(RandomEventUpdate::Resolved {
                        event: event.clone(),
                        option: *option,
                    }));
            }
            CommandOutcome::Posted(post) => {
                self.event_bus
                    .publish(SessionEvent::Social(SocialEvent::Posted(post.clone())));
            }
            CommandOutcome::SongRecorded(id) => info!("Recorded song {}", id),
            CommandOutcome::SongReleased(id) => info!("Released song {}", id),
            CommandOutcome::AlbumReleased(id) => info!("Released album {}", id),
            CommandOutcome::SongDeactivated { song, changed } => {
                debug!(song = %song, changed, "song deactivated");
            }
        }
    }
}

/// Player mistakes are warnings; anything internal is an error.
fn log_rejection(command: &Command, rejection: &EngineError) {
    let code = rejection.error_code();
    if rejection.severity().is_internal() {
        error!(command = command.name(), code, %rejection, "command failed");
    } else {
        warn!(command = command.name(), code, %rejection, "command rejected");
    }
}
