//! File-backed repositories.

mod save;
mod settings;

pub use save::FileSaveBackend;
pub use settings::FileSettingsStore;
