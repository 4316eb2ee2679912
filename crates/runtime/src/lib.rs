//! Session runtime for the rapper career simulation.
//!
//! This crate wires the deterministic core into a running session: a single
//! writer worker owns the career state, clients talk to it through a
//! cloneable [`SessionHandle`], and an auto-saver persists snapshots with a
//! local fallback.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] stores saves and settings
//! - [`workers`] holds the background tasks
pub mod api;
pub mod events;
pub mod repository;
pub mod session;
pub mod workers;

pub use api::{Result, RuntimeError, SessionHandle};
pub use events::{
    EventBus, RandomEventUpdate, SaveEvent, SessionEvent, SocialEvent, Topic, WeekEvent,
};
pub use repository::{
    FileSaveBackend, FileSettingsStore, InMemorySaveBackend, InMemorySettingsStore,
    RepositoryError, SAVE_VERSION, SaveBackend, SaveGame, SaveKey, Settings, SettingsStore,
};
pub use session::{Session, SessionBuilder, SessionConfig};
pub use workers::{AutoSaveOutcome, AutoSaver};
