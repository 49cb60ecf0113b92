//! Show command - load a layout and print the starting board

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexfort_core::{load_layout, Board, GameConfig};

use crate::report;

#[derive(Args)]
pub struct ShowArgs {
    /// Board layout file
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Output the board as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let records = load_layout(&args.board)
        .with_context(|| format!("Failed to load board: {}", args.board.display()))?;
    if records.is_empty() {
        anyhow::bail!("Board {} has no valid tiles", args.board.display());
    }

    let board = Board::new(records, &GameConfig::default());
    report::print_board(&board.snapshot(), args.json)
}
