//! Terrain kinds and tile state

use serde::{Deserialize, Serialize};

use crate::hex::{Direction, Hex};
use crate::player::{Flag, Side};
use crate::units::Unit;

/// Gold credited per occupied gold tile at end of turn
pub const GOLD_INCOME: u32 = 1;

/// Terrain kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Plain,
    Mountain,
    Gold,
    /// Home fort with a fixed owner
    Fort(Side),
    /// Fort taken over by whoever last occupied it
    ForwardFort,
}

impl Terrain {
    pub fn is_passable(self) -> bool {
        self != Terrain::Mountain
    }

    /// Owner a tile of this terrain starts with
    pub fn initial_owner(self) -> Option<Side> {
        match self {
            Terrain::Fort(side) => Some(side),
            _ => None,
        }
    }
}

/// A single board tile
#[derive(Clone, Debug)]
pub struct Tile {
    hex: Hex,
    terrain: Terrain,
    owner: Option<Side>,
    unit: Option<Unit>,
    flags: Vec<Flag>,
    neighbors: [Option<Hex>; 6],
}

impl Tile {
    pub fn new(hex: Hex, terrain: Terrain) -> Self {
        Self {
            hex,
            terrain,
            owner: terrain.initial_owner(),
            unit: None,
            flags: Vec::new(),
            neighbors: [None; 6],
        }
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.flags.extend(flags);
        self
    }

    pub fn hex(&self) -> Hex {
        self.hex
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn owner(&self) -> Option<Side> {
        self.owner
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    pub(crate) fn unit_mut(&mut self) -> Option<&mut Unit> {
        self.unit.as_mut()
    }

    /// Flags resting on this tile
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn neighbor(&self, direction: Direction) -> Option<Hex> {
        self.neighbors[direction as usize]
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Hex)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(dir).map(|hex| (dir, hex)))
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: [Option<Hex>; 6]) {
        self.neighbors = neighbors;
    }

    /// Can a unit step onto this tile?
    pub fn is_moveable(&self) -> bool {
        self.unit.is_none() && self.terrain.is_passable()
    }

    /// Does this tile hold a unit that `side` may attack?
    pub fn is_attackable_by(&self, side: Side) -> bool {
        self.terrain.is_passable() && self.unit.as_ref().is_some_and(|u| u.owner() != side)
    }

    /// Can `side` place a new unit here?
    pub fn accepts_spawn(&self, side: Side) -> bool {
        self.unit.is_none() && self.terrain.is_passable() && self.owner == Some(side)
    }

    pub(crate) fn take_unit(&mut self) -> Option<Unit> {
        self.unit.take()
    }

    /// Return a unit that was lifted off this tile, skipping the move-in rules
    pub(crate) fn put_back(&mut self, unit: Unit) {
        debug_assert!(self.unit.is_none(), "tile {} already occupied", self.hex);
        self.unit = Some(unit);
    }

    pub(crate) fn drop_flag(&mut self, flag: Flag) {
        self.flags.push(flag);
    }

    /// Put `unit` on this tile and run the move-in rules: forward forts change
    /// hands, a wanted flag is picked up. Returns the winning side if the
    /// occupant completed a flag capture.
    pub(crate) fn occupy(&mut self, mut unit: Unit) -> Option<Side> {
        debug_assert!(self.unit.is_none(), "tile {} already occupied", self.hex);

        if self.terrain == Terrain::ForwardFort {
            self.owner = Some(unit.owner());
        }

        if let Some(pos) = self.flags.iter().position(|flag| unit.wants_flag(flag)) {
            let flag = self.flags.remove(pos);
            if unit.pick_up(flag).is_err() {
                self.flags.push(flag);
            }
        }

        self.unit = Some(unit);
        self.captured_by()
    }

    /// Side that wins by standing here: a unit carrying an enemy flag on its own fort
    pub fn captured_by(&self) -> Option<Side> {
        let Terrain::Fort(fort_owner) = self.terrain else {
            return None;
        };
        let unit = self.unit.as_ref()?;
        let flag = unit.flag()?;
        (flag.owner() != fort_owner).then_some(unit.owner())
    }

    /// Gold owed to the occupant's owner at end of turn
    pub fn income(&self) -> Option<(Side, u32)> {
        match self.terrain {
            Terrain::Gold => self.unit.as_ref().map(|u| (u.owner(), GOLD_INCOME)),
            Terrain::Plain | Terrain::Mountain | Terrain::Fort(_) | Terrain::ForwardFort => None,
        }
    }
}
