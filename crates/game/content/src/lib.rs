//! Data-driven content definitions and loaders.
//!
//! This crate houses the shipped game data and the loaders that read it:
//! - Event catalog (data-driven via RON)
//! - AI rapper roster (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content seeds a new session and is copied into the initial game state;
//! nothing here is consulted again once a session runs.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EventCatalog, EventLoader, Roster, RosterLoader, bundled,
};
