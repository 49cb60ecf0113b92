//! Hex geometry with axial coordinates

use serde::{Deserialize, Serialize};

/// Largest coordinate magnitude a board may use. Neighbor steps, `z` and
/// distances between in-bounds hexes never overflow `i32`.
pub const MAX_COORDINATE: i32 = 1 << 20;

/// Axial hex coordinates. The cube coordinate `z = -x - y` is derived, never stored.
///
/// Ordering is lexicographic on `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub x: i32,
    pub y: i32,
}

impl Hex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn z(&self) -> i32 {
        -self.x - self.y
    }

    /// Both coordinates within `MAX_COORDINATE`
    pub fn in_bounds(&self) -> bool {
        let limit = MAX_COORDINATE.unsigned_abs();
        self.x.unsigned_abs() <= limit && self.y.unsigned_abs() <= limit
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z() - other.z()).unsigned_abs();
        (dx + dy + dz) / 2
    }

    /// Get neighbor in a direction
    pub fn neighbor(&self, direction: Direction) -> Hex {
        let (dx, dy) = direction.delta();
        Hex::new(self.x + dx, self.y + dy)
    }

    /// All six neighbors, in `Direction::ALL` order
    pub fn neighbors(&self) -> [Hex; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    pub fn is_adjacent(&self, other: Hex) -> bool {
        self.distance_to(other) == 1
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Distance between two hexes
pub fn distance(a: Hex, b: Hex) -> u32 {
    a.distance_to(b)
}

/// The six hex directions, clockwise from north
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N = 0,
    NE = 1,
    SE = 2,
    S = 3,
    SW = 4,
    NW = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::N,
        Direction::NE,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::NW,
    ];

    /// Axial offset `(dx, dy)` for one step in this direction
    pub const fn delta(self) -> (i32, i32) {
        DIRECTIONS[self as usize]
    }
}

/// Direction vectors in axial coordinates (dx, dy)
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
pub const DIRECTIONS: [(i32, i32); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // NW
];
