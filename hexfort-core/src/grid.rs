//! Tile map keyed by coordinate, with precomputed adjacency

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::hex::{Direction, Hex};
use crate::player::{Flag, Side};
use crate::tile::{Terrain, Tile};

/// One tile of a board layout, as produced by a loader
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub hex: Hex,
    pub terrain: Terrain,
    /// Owners of the flags resting here at game start
    #[serde(default)]
    pub flags: Vec<Side>,
}

impl TileRecord {
    pub fn new(hex: Hex, terrain: Terrain) -> Self {
        Self {
            hex,
            terrain,
            flags: Vec::new(),
        }
    }

    pub fn with_flag(mut self, owner: Side) -> Self {
        self.flags.push(owner);
        self
    }
}

/// The set of tiles making up a board
#[derive(Clone, Debug, Default)]
pub struct TileGrid {
    tiles: FxHashMap<Hex, Tile>,
}

impl TileGrid {
    /// Build a grid from layout records. A repeated coordinate replaces the
    /// earlier record; records outside `MAX_COORDINATE` are dropped.
    pub fn from_records(records: impl IntoIterator<Item = TileRecord>) -> Self {
        let mut tiles = FxHashMap::default();
        for record in records {
            if !record.hex.in_bounds() {
                tracing::warn!("Dropping out-of-bounds tile at {}", record.hex);
                continue;
            }
            let tile = Tile::new(record.hex, record.terrain)
                .with_flags(record.flags.into_iter().map(Flag::new));
            if tiles.insert(record.hex, tile).is_some() {
                tracing::warn!("Duplicate tile at {}, keeping the later record", record.hex);
            }
        }

        let mut grid = Self { tiles };
        grid.link_neighbors();
        grid
    }

    /// Recompute every tile's adjacency from the current tile set
    pub fn link_neighbors(&mut self) {
        let links: Vec<(Hex, [Option<Hex>; 6])> = self
            .tiles
            .keys()
            .map(|&hex| {
                let neighbors = Direction::ALL.map(|dir| {
                    let next = hex.neighbor(dir);
                    self.tiles.contains_key(&next).then_some(next)
                });
                (hex, neighbors)
            })
            .collect();

        for (hex, neighbors) in links {
            if let Some(tile) = self.tiles.get_mut(&hex) {
                tile.set_neighbors(neighbors);
            }
        }
    }

    pub fn get(&self, hex: Hex) -> Option<&Tile> {
        self.tiles.get(&hex)
    }

    pub(crate) fn get_mut(&mut self, hex: Hex) -> Option<&mut Tile> {
        self.tiles.get_mut(&hex)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.tiles.contains_key(&hex)
    }

    /// Neighboring tile of `hex` in `direction`, if both exist
    pub fn neighbor(&self, hex: Hex, direction: Direction) -> Option<&Tile> {
        let next = self.tiles.get(&hex)?.neighbor(direction)?;
        self.tiles.get(&next)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> + '_ {
        self.tiles.values_mut()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Records for every hex within `radius` of the origin, all of one terrain
pub fn hexagon(radius: i32, terrain: Terrain) -> Vec<TileRecord> {
    let mut records = Vec::new();
    for x in -radius..=radius {
        for y in -radius..=radius {
            let hex = Hex::new(x, y);
            if hex.z().abs() <= radius {
                records.push(TileRecord::new(hex, terrain));
            }
        }
    }
    records
}
