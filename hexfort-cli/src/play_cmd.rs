//! Play command - replay a scripted game against a board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_inputs(), replay(), report
//! - Level 3: apply_command()
//! - Level 4: script parsing, RNG setup

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexfort_core::{load_layout, Board, ClickOutcome, GameConfig, Hex, TileRecord, UnitKind};

use crate::report;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board layout file
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Command script: `click X Y`, `spawn KIND`, `cancel`, `end`
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Random seed for combat (overrides the config seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output the final board as JSON
    #[arg(long)]
    pub json: bool,
}

/// One scripted player action
#[derive(Clone, Copy, Debug, PartialEq)]
enum ScriptCommand {
    Click(Hex),
    Spawn(UnitKind),
    Cancel,
    EndTurn,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load layout, config and script
/// 2. Replay the script
/// 3. Report the final board
pub fn run(args: PlayArgs) -> Result<()> {
    let (records, config, script) = load_inputs(&args)?;

    tracing::info!(
        "Starting game: {} tiles, {} commands, {} starting gold",
        records.len(),
        script.len(),
        config.starting_gold
    );

    let mut board = Board::with_rng(records, &config, create_rng(args.seed.or(config.seed)));
    replay(&mut board, &script);

    report::print_board(&board.snapshot(), args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_inputs(args: &PlayArgs) -> Result<(Vec<TileRecord>, GameConfig, Vec<(usize, ScriptCommand)>)> {
    let records = load_layout(&args.board)
        .with_context(|| format!("Failed to load board: {}", args.board.display()))?;
    if records.is_empty() {
        anyhow::bail!("Board {} has no valid tiles", args.board.display());
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {}", args.script.display()))?;
    let script = parse_script(&text)
        .with_context(|| format!("Invalid script: {}", args.script.display()))?;

    Ok((records, config, script))
}

/// Apply every command in order, stopping early once the game is won
fn replay(board: &mut Board<ChaCha8Rng>, script: &[(usize, ScriptCommand)]) {
    for &(line, command) in script {
        if board.is_game_over() {
            tracing::info!("Game over before line {}, ignoring the rest of the script", line);
            break;
        }
        let accepted = apply_command(board, command);
        if !accepted {
            tracing::warn!("Line {}: {:?} had no effect", line, command);
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn apply_command(board: &mut Board<ChaCha8Rng>, command: ScriptCommand) -> bool {
    let accepted = match command {
        ScriptCommand::Click(hex) => {
            let outcome = board.click(hex);
            tracing::info!("{:?} click {} -> {:?}", board.current_player(), hex, outcome);
            return outcome != ClickOutcome::Ignored;
        }
        ScriptCommand::Spawn(kind) => board.begin_spawn(kind),
        ScriptCommand::Cancel => board.cancel_spawn(),
        ScriptCommand::EndTurn => board.end_turn(),
    };
    if accepted {
        tracing::info!("{:?} applied", command);
    }
    accepted
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Parse a script into commands tagged with their 1-based line numbers
fn parse_script(text: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = parse_command(line).with_context(|| format!("line {}: `{}`", line_number, line))?;
        commands.push((line_number, command));
    }
    Ok(commands)
}

fn parse_command(line: &str) -> Result<ScriptCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["click", x, y] => {
            let x = x.parse().context("bad x coordinate")?;
            let y = y.parse().context("bad y coordinate")?;
            Ok(ScriptCommand::Click(Hex::new(x, y)))
        }
        ["spawn", kind] => UnitKind::from_name(kind)
            .map(ScriptCommand::Spawn)
            .ok_or_else(|| anyhow::anyhow!("Unknown unit kind: {}", kind)),
        ["cancel"] => Ok(ScriptCommand::Cancel),
        ["end"] => Ok(ScriptCommand::EndTurn),
        _ => anyhow::bail!("Unknown command"),
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
