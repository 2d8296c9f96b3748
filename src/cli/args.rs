//! Command-line argument parsing for chatwindow
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chatwindow - Replay conversations through a bounded token window
#[derive(Parser, Debug)]
#[command(name = "chatwindow")]
#[command(version)]
#[command(about = "Replay conversations through a bounded token window", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only print the final summary)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed a JSON-lines transcript through a conversation context
    Replay(ReplayArgs),

    /// Display current configuration
    Config,
}

/// Options for `replay`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Transcript file, one `{"role", "content", "tokens"?}` object per line
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: PathBuf,

    /// Override the model's token budget
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Override the conversation owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Override the initial system message
    #[arg(long)]
    pub system: Option<String>,

    /// Estimate missing token counts with a 10% safety margin
    #[arg(long)]
    pub conservative: bool,

    /// End the conversation after the last turn
    #[arg(long)]
    pub end: bool,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Print one line per replayed turn
    pub fn show_turns(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
