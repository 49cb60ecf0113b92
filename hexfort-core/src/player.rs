//! Players, sides and flags

use serde::{Deserialize, Serialize};

/// Number of players in every game
pub const PLAYER_COUNT: usize = 2;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Orange = 0,
    Blue = 1,
}

impl Side {
    pub const ALL: [Side; PLAYER_COUNT] = [Side::Orange, Side::Blue];

    pub fn index(self) -> usize {
        self as usize
    }

}

/// Per-player state owned by the board
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    side: Side,
    gold: u32,
}

impl Player {
    pub fn new(side: Side, starting_gold: u32) -> Self {
        Self {
            side,
            gold: starting_gold,
        }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.gold
    }

    pub(crate) fn credit(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deduct `cost`. Callers check `can_afford` first.
    pub(crate) fn charge(&mut self, cost: u32) {
        debug_assert!(self.can_afford(cost), "{:?} charged {} with {} gold", self.side, cost, self.gold);
        self.gold = self.gold.saturating_sub(cost);
    }
}

/// Capture objective. Its owner is fixed when the layout is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flag {
    owner: Side,
}

impl Flag {
    pub const fn new(owner: Side) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Side {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_index() {
        for (index, side) in Side::ALL.into_iter().enumerate() {
            assert_eq!(side.index(), index);
        }
        assert_eq!(Side::Blue.index(), 1);
    }

    #[test]
    fn test_gold() {
        let mut player = Player::new(Side::Orange, 3);
        assert!(player.can_afford(3));
        assert!(!player.can_afford(4));
        player.charge(2);
        player.credit(5);
        assert_eq!(player.gold(), 6);
    }
}
