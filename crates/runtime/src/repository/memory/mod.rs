//! In-memory repositories for tests and local runs.

mod save;
mod settings;

pub use save::InMemorySaveBackend;
pub use settings::InMemorySettingsStore;
