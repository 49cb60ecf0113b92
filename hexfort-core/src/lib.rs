//! HEXFORT Core - Rules engine
//!
//! This crate provides the board simulation for HEXFORT:
//! - Hex geometry (axial coordinates)
//! - Terrain, tiles and the coordinate-keyed tile grid
//! - Unit types and the combat matrix
//! - Bounded move/attack path search
//! - Randomized combat resolution
//! - The board aggregate: selection, spawning, turns and flag-capture victory
//! - Layout loading and read-only snapshots for renderers

pub mod hex;
pub mod player;
pub mod units;
pub mod tile;
pub mod grid;
pub mod path;
pub mod combat;
pub mod board;
pub mod config;
pub mod error;
pub mod layout;
pub mod view;

// Re-exports for convenient access
pub use hex::{distance, Direction, Hex, DIRECTIONS, MAX_COORDINATE};
pub use player::{Flag, Player, Side, PLAYER_COUNT};
pub use units::{combat_bias, Category, Unit, UnitKind, UnitType, UNIT_TYPES};
pub use tile::{Terrain, Tile, GOLD_INCOME};
pub use grid::{hexagon, TileGrid, TileRecord};
pub use path::{enumerate_paths, Path, PathSet, Reachable};
pub use combat::{exchange_fire, CombatReport, COMBAT_MARGIN};
pub use board::{Board, ClickOutcome, Interaction};
pub use config::{GameConfig, STARTING_GOLD};
pub use error::{LayoutError, RulesError};
pub use layout::{load_layout, parse_layout, parse_record};
pub use view::{BoardView, TileView, UnitView};
