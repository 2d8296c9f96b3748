//! chatwindow - CLI Entry Point

use anyhow::{Context, Result};
use chatwindow::cli::replay::{self, TurnOutcome};
use chatwindow::cli::{Args, Commands, Config, ReplayArgs, Verbosity};
use chatwindow::context::TokenCounter;
use chatwindow::ModelCapability;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();

    // RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match &args.command {
        Commands::Replay(replay_args) => run_replay(&config, replay_args, verbosity),
        Commands::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn run_replay(base: &Config, args: &ReplayArgs, verbosity: Verbosity) -> Result<()> {
    let config = replay::effective_config(base, args)?;
    let counter = if args.conservative {
        TokenCounter::conservative()
    } else {
        TokenCounter::new()
    };

    let messages = replay::load_transcript(&args.transcript, &counter)
        .with_context(|| format!("Failed to load transcript {}", args.transcript.display()))?;
    let mut context = replay::start_conversation(&config, &counter)
        .context("Failed to start conversation")?;

    let report = replay::replay(&mut context, messages);
    if args.end {
        context.end();
    }

    if args.json {
        println!("{}", context.snapshot().to_json()?);
        return Ok(());
    }

    if verbosity.show_turns() {
        for (turn, outcome) in report.turns.iter().enumerate() {
            match outcome {
                TurnOutcome::Added { evicted: 0, usage } => {
                    println!("{} turn {:>3}  usage {}", "✓".green(), turn, usage);
                }
                TurnOutcome::Added { evicted, usage } => {
                    println!(
                        "{} turn {:>3}  usage {}  evicted {}",
                        "↻".yellow(),
                        turn,
                        usage,
                        evicted
                    );
                }
                TurnOutcome::Rejected { reason } => {
                    println!("{} turn {:>3}  {}", "✗".red(), turn, reason.red());
                }
            }
        }
        println!();
    }

    println!("{}", "Conversation".bold());
    println!("  id:        {}", context.id());
    println!("  owner:     {}", context.owner_id());
    println!("  status:    {}", context.status());
    println!(
        "  model:     {} ({} tokens)",
        context.config().model.name(),
        context.max_tokens()
    );
    println!(
        "  usage:     {} / {} ({} free)",
        context.token_usage(),
        context.max_tokens(),
        context.remaining_tokens()
    );
    println!(
        "  messages:  {} active, {} archived",
        context.count_messages(),
        context.count_archived()
    );
    println!(
        "  turns:     {} accepted, {} rejected",
        report.accepted().to_string().green(),
        report.rejected().to_string().red()
    );

    Ok(())
}
