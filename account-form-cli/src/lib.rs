//! Command-line frontend for the account form store.
//!
//! Plays the UI layer: it resolves where the local store lives, loads the
//! account list once, applies one operation per invocation and prints the
//! resulting state.

pub mod adapters;
pub mod args;
pub mod commands;
pub mod config;

pub use adapters::JsonFileStorage;
pub use args::{Cli, Command};
pub use commands::run;
pub use config::AppConfig;
