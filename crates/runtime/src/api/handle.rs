//! Cloneable façade for issuing commands to a session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for every
//! gameplay command, read-only selectors over state snapshots, and event
//! subscriptions.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use rapsim_core::{
    ActiveEvent, Album, AlbumId, CharacterStats, ChartStanding, Command, CommandOutcome,
    GameState, PostOnSocialMedia, RecordSong, ReleaseAlbum, ReleaseSong, ResolveEvent,
    SocialPost, Song, SongId, Week, WeekReport, WeeklyStats, WeeklySummary, global_standing,
};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, SessionEvent, Topic};
use crate::workers::WorkerCommand;

/// Client-facing handle to interact with a session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<WorkerCommand>,
    event_bus: EventBus,
    nearby_window: usize,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<WorkerCommand>,
        event_bus: EventBus,
        nearby_window: usize,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            nearby_window,
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> WorkerCommand,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Executes any command on the simulation worker.
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome> {
        self.request(|reply| WorkerCommand::Execute { command, reply })
            .await?
    }

    /// Stages the coming week; the summary is shown before committing.
    pub async fn begin_week(&self) -> Result<WeeklySummary> {
        match self.execute(Command::BeginWeek).await? {
            CommandOutcome::WeekStaged(summary) => Ok(summary),
            _ => Err(unexpected("begin_week")),
        }
    }

    pub async fn commit_week(&self) -> Result<WeekReport> {
        match self.execute(Command::CommitWeek).await? {
            CommandOutcome::WeekCommitted(report) => Ok(report),
            _ => Err(unexpected("commit_week")),
        }
    }

    pub async fn advance_week(&self) -> Result<WeekReport> {
        match self.execute(Command::AdvanceWeek).await? {
            CommandOutcome::WeekCommitted(report) => Ok(report),
            _ => Err(unexpected("advance_week")),
        }
    }

    pub async fn resolve_event(
        &self,
        event_id: impl Into<String>,
        option: usize,
    ) -> Result<ActiveEvent> {
        let command = Command::ResolveEvent(ResolveEvent::new(event_id, option));
        match self.execute(command).await? {
            CommandOutcome::EventResolved { event, .. } => Ok(event),
            _ => Err(unexpected("resolve_event")),
        }
    }

    pub async fn post_on_social_media(&self, post: PostOnSocialMedia) -> Result<SocialPost> {
        match self.execute(Command::PostOnSocialMedia(post)).await? {
            CommandOutcome::Posted(post) => Ok(post),
            _ => Err(unexpected("post_on_social_media")),
        }
    }

    pub async fn record_song(&self, command: RecordSong) -> Result<SongId> {
        match self.execute(Command::RecordSong(command)).await? {
            CommandOutcome::SongRecorded(id) => Ok(id),
            _ => Err(unexpected("record_song")),
        }
    }

    pub async fn release_song(&self, command: ReleaseSong) -> Result<SongId> {
        match self.execute(Command::ReleaseSong(command)).await? {
            CommandOutcome::SongReleased(id) => Ok(id),
            _ => Err(unexpected("release_song")),
        }
    }

    pub async fn release_album(&self, command: ReleaseAlbum) -> Result<AlbumId> {
        match self.execute(Command::ReleaseAlbum(command)).await? {
            CommandOutcome::AlbumReleased(id) => Ok(id),
            _ => Err(unexpected("release_album")),
        }
    }

    /// Returns whether the song was still active.
    pub async fn deactivate_song(&self, song: SongId) -> Result<bool> {
        let command = Command::DeactivateSong(rapsim_core::DeactivateSong { song });
        match self.execute(command).await? {
            CommandOutcome::SongDeactivated { changed, .. } => Ok(changed),
            _ => Err(unexpected("deactivate_song")),
        }
    }

    /// Clone of the authoritative state.
    pub async fn snapshot(&self) -> Result<GameState> {
        self.request(|reply| WorkerCommand::Snapshot { reply }).await
    }

    /// Swaps in a loaded career, discarding the current one.
    pub async fn replace_state(&self, state: GameState) -> Result<()> {
        self.request(|reply| WorkerCommand::ReplaceState {
            state: Box::new(state),
            reply,
        })
        .await
    }

    pub async fn songs(&self) -> Result<Vec<Song>> {
        Ok(self.snapshot().await?.songs)
    }

    pub async fn albums(&self) -> Result<Vec<Album>> {
        Ok(self.snapshot().await?.albums)
    }

    pub async fn stats(&self) -> Result<CharacterStats> {
        Ok(self.snapshot().await?.stats)
    }

    pub async fn current_week(&self) -> Result<Week> {
        Ok(self.snapshot().await?.week)
    }

    pub async fn weekly_stats(&self) -> Result<Vec<WeeklyStats>> {
        Ok(self.snapshot().await?.weekly_stats)
    }

    /// Events still waiting for a decision.
    pub async fn active_events(&self) -> Result<Vec<ActiveEvent>> {
        Ok(self
            .snapshot()
            .await?
            .active_events
            .into_iter()
            .filter(|event| !event.resolved)
            .collect())
    }

    /// The player's chart position with the configured nearby window.
    pub async fn standing(&self) -> Result<ChartStanding> {
        let state = self.snapshot().await?;
        Ok(global_standing(&state, self.nearby_window))
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Week` - Week staged and committed
    /// - `Topic::RandomEvent` - Events triggered and resolved
    /// - `Topic::Social` - Posts published
    /// - `Topic::Save` - Auto-save results
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<SessionEvent>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown_worker(&self) -> Result<()> {
        self.request(|reply| WorkerCommand::Shutdown { reply }).await
    }
}

fn unexpected(command: &'static str) -> RuntimeError {
    RuntimeError::UnexpectedOutcome { command }
}
