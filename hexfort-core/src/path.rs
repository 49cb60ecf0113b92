//! Immutable step paths and the bounded move/attack search

use rustc_hash::FxHashMap;

use crate::grid::TileGrid;
use crate::hex::{Direction, Hex};
use crate::player::Side;

/// A sequence of direction steps from a fixed origin.
///
/// Paths never change after construction; `extended` returns a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    origin: Hex,
    steps: Vec<Direction>,
    destination: Hex,
}

impl Path {
    /// Zero-length path standing on `origin`
    pub fn new(origin: Hex) -> Self {
        Self {
            origin,
            steps: Vec::new(),
            destination: origin,
        }
    }

    /// This path followed by one more step
    pub fn extended(&self, direction: Direction) -> Path {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(direction);
        Path {
            origin: self.origin,
            steps,
            destination: self.destination.neighbor(direction),
        }
    }

    /// This path without its final step. Empty paths are returned unchanged.
    pub fn truncated(&self) -> Path {
        let mut path = Path::new(self.origin);
        for &dir in self.steps.iter().take(self.steps.len().saturating_sub(1)) {
            path = path.extended(dir);
        }
        path
    }

    pub fn origin(&self) -> Hex {
        self.origin
    }

    pub fn destination(&self) -> Hex {
        self.destination
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every hex entered along the path, ending with the destination
    pub fn hexes(&self) -> impl Iterator<Item = Hex> + '_ {
        self.steps.iter().scan(self.origin, |hex, &dir| {
            *hex = hex.neighbor(dir);
            Some(*hex)
        })
    }
}

/// Shortest known path to each destination
pub type PathSet = FxHashMap<Hex, Path>;

/// Legal destinations for one selected unit
#[derive(Clone, Debug, Default)]
pub struct Reachable {
    pub moves: PathSet,
    pub attacks: PathSet,
}

impl Reachable {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.attacks.clear();
    }
}

/// Enumerate move and attack destinations for the unit standing on `origin`.
///
/// The unit's remaining moves bound the search depth. Moveable tiles extend
/// the search; an enemy-held tile ends it one step past the moveable frontier.
/// Mountains and friendly units block both.
pub fn enumerate_paths(grid: &TileGrid, origin: Hex) -> Reachable {
    let mut reachable = Reachable::default();
    let Some(unit) = grid.get(origin).and_then(|tile| tile.unit()) else {
        return reachable;
    };

    let range = unit.moves_remaining();
    if range > 0 {
        expand(grid, unit.owner(), &Path::new(origin), range, &mut reachable);
    }
    reachable
}

fn expand(grid: &TileGrid, side: Side, path: &Path, range: u32, out: &mut Reachable) {
    for dir in Direction::ALL {
        let Some(tile) = grid.neighbor(path.destination(), dir) else {
            continue;
        };
        let next = path.extended(dir);

        if tile.is_moveable() {
            // A destination already reached at least as cheaply was expanded
            // with at least as much range left.
            if record_shortest(&mut out.moves, next.clone()) && range > 1 {
                expand(grid, side, &next, range - 1, out);
            }
        } else if tile.is_attackable_by(side) {
            record_shortest(&mut out.attacks, next);
        }
    }
}

/// Insert `path` unless an equal or shorter one to the same destination exists
fn record_shortest(set: &mut PathSet, path: Path) -> bool {
    match set.get(&path.destination()) {
        Some(existing) if existing.len() <= path.len() => false,
        _ => {
            set.insert(path.destination(), path);
            true
        }
    }
}
