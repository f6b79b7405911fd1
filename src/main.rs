use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use speakdrill::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "speakdrill")]
#[command(about = "Speaking practice tracker - scores, streaks, and spaced review")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.speakdrill/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a completed practice attempt
    Record {
        /// Question type id (e.g. read_aloud, repeat_sentence)
        #[arg(long = "type", short = 't')]
        type_id: String,

        /// Overall score, 0-90
        #[arg(long, short)]
        score: u32,

        /// Bank question id the attempt was for
        #[arg(long, short)]
        question: Option<String>,

        /// Attempt duration in seconds
        #[arg(long, short)]
        duration: Option<u32>,

        /// The attempt was part of a mock test
        #[arg(long)]
        mock: bool,

        /// The attempt was on a prediction question
        #[arg(long)]
        prediction: bool,
    },

    /// Show progress: stats, level, streak, and badges
    Overview,

    /// List questions due for spaced-repetition review
    Review,

    /// Show today's challenge, or mark one of its items completed
    Daily {
        /// Item index to mark completed (0-based)
        #[arg(long)]
        complete: Option<usize>,

        /// Score for the completed item, 0-90
        #[arg(long, requires = "complete")]
        score: Option<u32>,
    },

    /// Run the daily practice reminder in the foreground
    Remind,

    /// Delete all stored progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match args.command {
        Some(Commands::Record {
            type_id,
            score,
            question,
            duration,
            mock,
            prediction,
        }) => {
            cli::record::record_command(&config, type_id, score, question, duration, mock, prediction)?;
        }
        Some(Commands::Review) => {
            cli::review::review_command(&config)?;
        }
        Some(Commands::Daily { complete, score }) => {
            cli::daily::daily_command(&config, complete, score)?;
        }
        Some(Commands::Remind) => {
            cli::remind::remind_command(&config)?;
        }
        Some(Commands::Reset { force }) => {
            cli::reset::reset_command(&config, force)?;
        }
        Some(Commands::Overview) | None => {
            cli::overview::overview_command(&config)?;
        }
    }

    Ok(())
}
