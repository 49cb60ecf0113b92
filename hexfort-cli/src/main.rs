//! HEXFORT CLI - Command-line interface
//!
//! Commands:
//! - show: Load a board layout and print it
//! - play: Replay a command script against a board

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod play_cmd;
mod report;
mod show_cmd;

#[derive(Parser)]
#[command(name = "hexfort")]
#[command(about = "HEXFORT hex-grid flag capture rules engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a board layout and print the starting position
    Show(show_cmd::ShowArgs),
    /// Replay a script of clicks, spawns and turn ends
    Play(play_cmd::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => show_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}
