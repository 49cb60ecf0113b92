//! Unit type definitions and per-unit state

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::player::{Flag, Side};

/// Combat class, selects the column of the combat matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Infantry = 0,
    Antiarmor = 1,
    Armor = 2,
}

/// Unit variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Marines = 0,
    Antitank = 1,
    Tank = 2,
}

/// Static unit type definition
#[derive(Clone, Debug)]
pub struct UnitType {
    pub name: &'static str,
    pub category: Category,
    pub cost: u32,
    pub max_health: u32,
    pub combat_strength: u32,
    pub moves_per_turn: u32,
    pub carries_flag: bool,
    /// Damage bias against [Infantry, Antiarmor, Armor] defenders
    pub combat_matrix: [f64; 3],
}

impl UnitType {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        name: &'static str,
        category: Category,
        cost: u32,
        max_health: u32,
        combat_strength: u32,
        moves_per_turn: u32,
        carries_flag: bool,
        combat_matrix: [f64; 3],
    ) -> Self {
        Self {
            name,
            category,
            cost,
            max_health,
            combat_strength,
            moves_per_turn,
            carries_flag,
            combat_matrix,
        }
    }
}

/// All unit types, indexed by `UnitKind`
pub static UNIT_TYPES: [UnitType; 3] = [
    UnitType::new("Marines", Category::Infantry, 1, 100, 50, 2, true, [1.0, 1.5, 0.5]),
    UnitType::new("Antitank", Category::Antiarmor, 2, 100, 60, 1, false, [0.5, 1.0, 1.5]),
    UnitType::new("Tank", Category::Armor, 3, 150, 80, 3, false, [1.5, 0.5, 1.0]),
];

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Marines, UnitKind::Antitank, UnitKind::Tank];

    pub fn stats(self) -> &'static UnitType {
        &UNIT_TYPES[self as usize]
    }

    pub fn cost(self) -> u32 {
        self.stats().cost
    }

    pub fn category(self) -> Category {
        self.stats().category
    }

    /// Look up a kind by name, ignoring case
    pub fn from_name(name: &str) -> Option<UnitKind> {
        UnitKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.stats().name.eq_ignore_ascii_case(name))
    }
}

/// Damage multiplier for `attacker` hitting a defender of `defender` category
pub fn combat_bias(attacker: UnitKind, defender: Category) -> f64 {
    attacker.stats().combat_matrix[defender as usize]
}

/// A unit on the board
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    kind: UnitKind,
    owner: Side,
    health: i32,
    moves_remaining: u32,
    flag: Option<Flag>,
}

impl Unit {
    /// Fresh unit at full health with a full move budget
    pub fn new(kind: UnitKind, owner: Side) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            owner,
            health: stats.max_health as i32,
            moves_remaining: stats.moves_per_turn,
            flag: None,
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn max_health(&self) -> u32 {
        self.kind.stats().max_health
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn combat_strength(&self) -> u32 {
        self.kind.stats().combat_strength
    }

    pub fn moves_per_turn(&self) -> u32 {
        self.kind.stats().moves_per_turn
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn flag(&self) -> Option<Flag> {
        self.flag
    }

    pub fn can_carry_flag(&self) -> bool {
        self.kind.stats().carries_flag
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Bias this unit applies when attacking `defender`
    pub fn bias_against(&self, defender: &Unit) -> f64 {
        combat_bias(self.kind, defender.category())
    }

    pub fn use_moves(&mut self, distance: u32) -> Result<(), RulesError> {
        if distance > self.moves_remaining {
            return Err(RulesError::InsufficientMoves {
                kind: self.kind,
                requested: distance,
                remaining: self.moves_remaining,
            });
        }
        self.moves_remaining -= distance;
        Ok(())
    }

    pub fn exhaust_moves(&mut self) {
        self.moves_remaining = 0;
    }

    pub fn reset_moves(&mut self) {
        self.moves_remaining = self.moves_per_turn();
    }

    pub fn inflict_damage(&mut self, damage: u32) {
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(damage);
    }

    /// Should this unit take `flag` when stepping onto it?
    pub fn wants_flag(&self, flag: &Flag) -> bool {
        self.can_carry_flag() && self.flag.is_none() && flag.owner() != self.owner
    }

    pub fn pick_up(&mut self, flag: Flag) -> Result<(), RulesError> {
        if !self.can_carry_flag() {
            return Err(RulesError::CannotCarryFlag(self.kind));
        }
        if self.flag.is_some() {
            return Err(RulesError::AlreadyCarrying(self.kind));
        }
        self.flag = Some(flag);
        Ok(())
    }

    pub fn drop_flag(&mut self) -> Option<Flag> {
        self.flag.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(UnitKind::from_name("marines"), Some(UnitKind::Marines));
        assert_eq!(UnitKind::from_name("TANK"), Some(UnitKind::Tank));
        assert_eq!(UnitKind::from_name("artillery"), None);
        for kind in UnitKind::ALL {
            assert_eq!(UNIT_TYPES[kind as usize].name, kind.stats().name);
        }
    }

    #[test]
    fn test_combat_matrix() {
        assert_eq!(combat_bias(UnitKind::Marines, Category::Antiarmor), 1.5);
        assert_eq!(combat_bias(UnitKind::Marines, Category::Armor), 0.5);
        assert_eq!(combat_bias(UnitKind::Antitank, Category::Armor), 1.5);
        assert_eq!(combat_bias(UnitKind::Tank, Category::Infantry), 1.5);
        assert_eq!(combat_bias(UnitKind::Tank, Category::Antiarmor), 0.5);
        for kind in UnitKind::ALL {
            // Same-category fights are unbiased
            assert_eq!(combat_bias(kind, kind.category()), 1.0);
        }
    }

    #[test]
    fn test_move_budget() {
        let mut unit = Unit::new(UnitKind::Marines, Side::Orange);
        assert_eq!(unit.moves_remaining(), 2);
        assert!(unit.use_moves(1).is_ok());
        assert_eq!(
            unit.use_moves(2),
            Err(RulesError::InsufficientMoves {
                kind: UnitKind::Marines,
                requested: 2,
                remaining: 1,
            })
        );
        assert_eq!(unit.moves_remaining(), 1);
        unit.exhaust_moves();
        assert_eq!(unit.moves_remaining(), 0);
        unit.reset_moves();
        assert_eq!(unit.moves_remaining(), unit.moves_per_turn());
    }

    #[test]
    fn test_damage() {
        let mut unit = Unit::new(UnitKind::Tank, Side::Blue);
        unit.inflict_damage(0);
        assert_eq!(unit.health(), 150);
        unit.inflict_damage(149);
        assert!(!unit.is_dead());
        unit.inflict_damage(1);
        assert!(unit.is_dead());
    }

    #[test]
    fn test_flag_carrying() {
        let orange_flag = Flag::new(Side::Orange);
        let mut marines = Unit::new(UnitKind::Marines, Side::Blue);
        assert!(marines.wants_flag(&orange_flag));
        assert!(!marines.wants_flag(&Flag::new(Side::Blue)));
        marines.pick_up(orange_flag).unwrap();
        assert!(!marines.wants_flag(&orange_flag));
        assert_eq!(marines.pick_up(orange_flag), Err(RulesError::AlreadyCarrying(UnitKind::Marines)));
        assert_eq!(marines.drop_flag(), Some(orange_flag));
        assert_eq!(marines.flag(), None);

        let mut tank = Unit::new(UnitKind::Tank, Side::Blue);
        assert!(!tank.wants_flag(&orange_flag));
        assert_eq!(tank.pick_up(orange_flag), Err(RulesError::CannotCarryFlag(UnitKind::Tank)));
    }
}
