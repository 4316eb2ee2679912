//! Terminal client for the rapper career simulation.
//!
//! The binary is the composition root: it reads [`ClientConfig`] from the
//! environment, loads content, builds a [`rapsim_runtime::Session`], and hands
//! its handle to the line-oriented [`repl`].

pub mod config;
pub mod input;
pub mod logging;
pub mod repl;
pub mod view;

pub use config::ClientConfig;
pub use input::{Input, parse_line};
