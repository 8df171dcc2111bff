//! FOURLINE CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the AI (or a friend) in the terminal
//! - match: Pit two difficulty tiers against each other
//! - analyze: Score every column of a position

mod analyze_cmd;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fourline")]
#[command(about = "Connect-Four with a minimax AI")]
struct Cli {
    /// Log search details unless RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play(play_cmd::PlayArgs),
    /// Run an AI-vs-AI match between two difficulty tiers
    Match(match_cmd::MatchArgs),
    /// Score every column of a position for the side to move
    Analyze(analyze_cmd::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args),
        Commands::Analyze(args) => analyze_cmd::run(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
