//! Read-only snapshot of a board for renderers and reports

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Interaction};
use crate::hex::Hex;
use crate::path::PathSet;
use crate::player::Side;
use crate::tile::{Terrain, Tile};
use crate::units::{Unit, UnitKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub kind: UnitKind,
    pub owner: Side,
    pub health: i32,
    pub max_health: u32,
    pub moves_remaining: u32,
    /// Owner of the carried flag
    pub carrying: Option<Side>,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            kind: unit.kind(),
            owner: unit.owner(),
            health: unit.health(),
            max_health: unit.max_health(),
            moves_remaining: unit.moves_remaining(),
            carrying: unit.flag().map(|flag| flag.owner()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub hex: Hex,
    pub terrain: Terrain,
    pub owner: Option<Side>,
    pub flags: Vec<Side>,
    pub unit: Option<UnitView>,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            hex: tile.hex(),
            terrain: tile.terrain(),
            owner: tile.owner(),
            flags: tile.flags().iter().map(|flag| flag.owner()).collect(),
            unit: tile.unit().map(UnitView::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub side: Side,
    pub gold: u32,
}

/// Everything a renderer needs, tiles sorted by coordinate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub turn: u32,
    pub current_player: Side,
    pub winner: Option<Side>,
    pub players: Vec<PlayerView>,
    pub interaction: Interaction,
    pub move_targets: Vec<Hex>,
    pub attack_targets: Vec<Hex>,
    pub tiles: Vec<TileView>,
}

fn sorted_targets(paths: &PathSet) -> Vec<Hex> {
    let mut targets: Vec<Hex> = paths.keys().copied().collect();
    targets.sort();
    targets
}

impl<R: Rng> Board<R> {
    pub fn snapshot(&self) -> BoardView {
        let mut tiles: Vec<TileView> = self.grid().iter().map(TileView::from).collect();
        tiles.sort_by_key(|tile| tile.hex);

        BoardView {
            turn: self.turn(),
            current_player: self.current_player(),
            winner: self.winner(),
            players: Side::ALL
                .iter()
                .map(|&side| PlayerView {
                    side,
                    gold: self.gold(side),
                })
                .collect(),
            interaction: self.interaction(),
            move_targets: sorted_targets(self.move_paths()),
            attack_targets: sorted_targets(self.attack_paths()),
            tiles,
        }
    }
}
