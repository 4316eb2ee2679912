//! Line-oriented command loop over a running session.
use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use rapsim_core::GameError;
use rapsim_runtime::{
    AutoSaveOutcome, RandomEventUpdate, RuntimeError, SaveEvent, Session, SessionEvent,
    SessionHandle, Topic,
};

use crate::input::{HELP, Input, parse_line};
use crate::view;

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Repl<'a> {
    session: &'a Session,
    handle: SessionHandle,
}

impl<'a> Repl<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            handle: session.handle(),
        }
    }

    /// Reads stdin until `quit` or end of input.
    pub async fn run(&self) -> Result<()> {
        let notifier = spawn_notifier(&self.handle);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{}", view::status(&self.handle.snapshot().await?));
        println!("type `help` for commands");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await {
                Flow::Continue(text) if text.is_empty() => {}
                Flow::Continue(text) => println!("{text}"),
                Flow::Quit => break,
            }
        }

        notifier.abort();
        Ok(())
    }

    /// Parses and runs one line; errors become output text.
    pub async fn handle_line(&self, line: &str) -> Flow {
        let result = match parse_line(line) {
            Ok(input) => self.dispatch(input).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            tracing::debug!("command failed: {:#}", e);
            Flow::Continue(describe_error(&e))
        })
    }

    pub async fn dispatch(&self, input: Input) -> Result<Flow> {
        let handle = &self.handle;
        let text = match input {
            Input::Empty => String::new(),
            Input::Help => HELP.to_string(),
            Input::Status => view::status(&handle.snapshot().await?),
            Input::Songs => view::songs(&handle.snapshot().await?),
            Input::Albums => view::albums(&handle.snapshot().await?),
            Input::Chart => view::chart(&handle.standing().await?),
            Input::Events => view::events(&handle.snapshot().await?),
            Input::Begin => {
                let summary = handle.begin_week().await?;
                format!("{}\n`commit` to apply", view::summary(&summary))
            }
            Input::Commit => self.describe_report(handle.commit_week().await?).await?,
            Input::Advance => self.describe_report(handle.advance_week().await?).await?,
            Input::Record(command) => {
                let title = command.title.clone();
                let id = handle.record_song(command).await?;
                let state = handle.snapshot().await?;
                let tier = state
                    .songs
                    .iter()
                    .find(|song| song.id == id)
                    .map(|song| song.tier.to_string())
                    .unwrap_or_default();
                format!("recorded \"{title}\" as {id} ({tier})")
            }
            Input::Release(command) => {
                let id = handle.release_song(command).await?;
                format!("released {id}")
            }
            Input::Album(command) => {
                let id = handle.release_album(command).await?;
                format!("released {id}")
            }
            Input::Deactivate(song) => {
                if handle.deactivate_song(song).await? {
                    format!("{song} no longer streams")
                } else {
                    format!("{song} was already inactive")
                }
            }
            Input::Post(command) => {
                let post = handle.post_on_social_media(command).await?;
                format!(
                    "posted on {}: {} likes, {} reposts, +{} followers",
                    post.platform, post.likes, post.reposts, post.new_followers
                )
            }
            Input::Resolve { event_id, option } => {
                let event = handle.resolve_event(event_id, option).await?;
                format!("resolved {}", event.title)
            }
            Input::Save => match self.session.save_now().await? {
                AutoSaveOutcome::Saved => "saved".to_string(),
                AutoSaveOutcome::Fallback { reason } => {
                    format!("saved locally ({reason})")
                }
                AutoSaveOutcome::Skipped => "a save is already running".to_string(),
                AutoSaveOutcome::Disabled => "saving is disabled".to_string(),
                AutoSaveOutcome::Failed(reason) => format!("save failed: {reason}"),
            },
            Input::Load => {
                if self.session.load_saved().await? {
                    view::status(&handle.snapshot().await?)
                } else {
                    "no save in this slot".to_string()
                }
            }
            Input::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(text))
    }

    async fn describe_report(&self, report: rapsim_core::WeekReport) -> Result<String> {
        let mut text = view::summary(&report.summary);
        if let Some(event) = &report.triggered_event {
            let state = self.handle.snapshot().await?;
            text.push_str("\n\n");
            text.push_str(&view::event(&state, event));
        }
        Ok(text)
    }
}

/// Prints auto-save results as they arrive.
fn spawn_notifier(handle: &SessionHandle) -> JoinHandle<()> {
    let mut save_rx = handle.subscribe(Topic::Save);
    let mut event_rx = handle.subscribe(Topic::RandomEvent);
    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                event = save_rx.recv() => event,
                event = event_rx.recv() => event,
            };
            match received {
                Ok(SessionEvent::Save(SaveEvent::FellBack { reason, .. })) => {
                    println!("\n(auto-save used the local fallback: {reason})");
                }
                Ok(SessionEvent::Save(SaveEvent::Failed { reason })) => {
                    println!("\n(auto-save failed: {reason})");
                }
                Ok(SessionEvent::RandomEvent(RandomEventUpdate::Resolved { event, option })) => {
                    tracing::debug!("{} resolved with option {}", event.id, option + 1);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("notifier lagged by {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Session errors carry a stable code; parse errors are plain text.
fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<RuntimeError>() {
        Some(runtime) => format!("error[{}]: {error:#}", runtime.error_code()),
        None => format!("error: {error:#}"),
    }
}
