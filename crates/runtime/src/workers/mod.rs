//! Worker tasks that back a session.
//!
//! The simulation worker is the single writer of the career state; the
//! auto-save worker periodically snapshots it into the save backends.

mod autosave;
mod simulation;

pub use autosave::{AutoSaveOutcome, AutoSaveWorker, AutoSaver};
pub use simulation::{SimulationWorker, WorkerCommand};
