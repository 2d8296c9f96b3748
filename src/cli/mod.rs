//! CLI module for chatwindow
//!
//! Handles command-line argument parsing, configuration, and transcript replay.

pub mod config;
pub mod args;
pub mod replay;

pub use config::Config;
pub use args::{Args, Commands, ReplayArgs, Verbosity};
pub use replay::{ReplayReport, TurnOutcome};
