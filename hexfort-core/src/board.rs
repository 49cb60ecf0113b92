//! Board aggregate: turn order, selection state machine and victory

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{exchange_fire, CombatReport};
use crate::config::GameConfig;
use crate::grid::{TileGrid, TileRecord};
use crate::hex::Hex;
use crate::path::{enumerate_paths, PathSet, Reachable};
use crate::player::{Player, Side, PLAYER_COUNT};
use crate::tile::Tile;
use crate::units::{Unit, UnitKind};

// ============================================================================
// INTERACTION STATE
// ============================================================================

/// Where the current player is in the click-driven interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Idle,
    /// A unit kind was chosen and waits for a tile to be placed on
    Spawning(UnitKind),
    /// A friendly unit is selected; its move and attack sets are live
    Selected(Hex),
}

/// Result of clicking a tile
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// The click did not change anything
    Ignored,
    Selected(Hex),
    Deselected,
    Spawned { hex: Hex, kind: UnitKind },
    Moved { from: Hex, to: Hex },
    Attacked {
        from: Hex,
        target: Hex,
        report: CombatReport,
    },
}

// ============================================================================
// BOARD
// ============================================================================

/// Complete game state. The only mutator of tiles, units and players.
#[derive(Clone, Debug)]
pub struct Board<R = ChaCha8Rng> {
    grid: TileGrid,
    players: [Player; PLAYER_COUNT],
    current: usize,
    turn: u32,
    interaction: Interaction,
    reachable: Reachable,
    winner: Option<Side>,
    combat_margin: f64,
    rng: R,
}

impl Board<ChaCha8Rng> {
    /// Create a board from layout records, seeding combat from the config
    pub fn new(records: impl IntoIterator<Item = TileRecord>, config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Board::with_rng(records, config, rng)
    }
}

impl<R: Rng> Board<R> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a board with an explicit random source for combat
    pub fn with_rng(records: impl IntoIterator<Item = TileRecord>, config: &GameConfig, rng: R) -> Self {
        let grid = TileGrid::from_records(records);
        tracing::debug!("Board created with {} tiles", grid.len());

        Self {
            grid,
            players: Side::ALL.map(|side| Player::new(side, config.starting_gold)),
            current: 0,
            turn: 1,
            interaction: Interaction::Idle,
            reachable: Reachable::default(),
            winner: None,
            combat_margin: config.combat_margin,
            rng,
        }
    }

    /// Put a unit straight onto an empty tile without charging gold.
    /// Used to lay out scenarios; move-in rules still apply.
    pub fn deploy(&mut self, hex: Hex, kind: UnitKind, owner: Side) -> bool {
        match self.grid.get_mut(hex) {
            Some(tile) if tile.is_moveable() => {
                let captured = tile.occupy(Unit::new(kind, owner));
                self.record_capture(captured);
                true
            }
            _ => false,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn tile(&self, hex: Hex) -> Option<&Tile> {
        self.grid.get(hex)
    }

    pub fn unit(&self, hex: Hex) -> Option<&Unit> {
        self.grid.get(hex).and_then(Tile::unit)
    }

    pub fn current_player(&self) -> Side {
        Side::ALL[self.current]
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn gold(&self, side: Side) -> u32 {
        self.player(side).gold()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn selected(&self) -> Option<Hex> {
        match self.interaction {
            Interaction::Selected(hex) => Some(hex),
            _ => None,
        }
    }

    pub fn spawning(&self) -> Option<UnitKind> {
        match self.interaction {
            Interaction::Spawning(kind) => Some(kind),
            _ => None,
        }
    }

    /// Moveable destinations of the selected unit
    pub fn move_paths(&self) -> &PathSet {
        &self.reachable.moves
    }

    /// Attackable destinations of the selected unit
    pub fn attack_paths(&self) -> &PathSet {
        &self.reachable.attacks
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    // ========================================================================
    // PLAYER ACTIONS
    // ========================================================================

    /// Handle a click on `hex`. Invalid clicks leave the board unchanged.
    pub fn click(&mut self, hex: Hex) -> ClickOutcome {
        if self.is_game_over() {
            return ClickOutcome::Ignored;
        }

        match self.interaction {
            Interaction::Spawning(kind) => self.try_spawn(kind, hex),
            Interaction::Selected(selected) if selected == hex => {
                self.clear_interaction();
                ClickOutcome::Deselected
            }
            Interaction::Selected(selected) => self
                .try_move(selected, hex)
                .or_else(|| self.try_attack(selected, hex))
                .unwrap_or(ClickOutcome::Ignored),
            Interaction::Idle => {
                let side = self.current_player();
                if self.unit(hex).is_some_and(|unit| unit.owner() == side) {
                    self.select(hex);
                    ClickOutcome::Selected(hex)
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    /// Choose a unit kind to place. Refused if the current player cannot afford it.
    pub fn begin_spawn(&mut self, kind: UnitKind) -> bool {
        if self.is_game_over() || !self.player(self.current_player()).can_afford(kind.cost()) {
            return false;
        }
        self.clear_interaction();
        self.interaction = Interaction::Spawning(kind);
        tracing::debug!("{:?} preparing to spawn {:?}", self.current_player(), kind);
        true
    }

    /// Drop a pending spawn. Returns whether one was pending.
    pub fn cancel_spawn(&mut self) -> bool {
        if self.is_game_over() || self.spawning().is_none() {
            return false;
        }
        self.clear_interaction();
        true
    }

    /// Finish the current player's turn
    pub fn end_turn(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        let income: Vec<(Side, u32)> = self.grid.iter().filter_map(Tile::income).collect();
        for (side, amount) in income {
            self.players[side.index()].credit(amount);
        }

        for tile in self.grid.iter_mut() {
            if let Some(unit) = tile.unit_mut() {
                unit.reset_moves();
            }
        }

        self.clear_interaction();
        self.current = (self.current + 1) % PLAYER_COUNT;
        self.turn += 1;

        tracing::info!(
            "Turn {}: {:?} to play (gold {} / {})",
            self.turn,
            self.current_player(),
            self.gold(Side::Orange),
            self.gold(Side::Blue)
        );
        true
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn select(&mut self, hex: Hex) {
        self.interaction = Interaction::Selected(hex);
        self.reachable = enumerate_paths(&self.grid, hex);
        tracing::debug!(
            "Selected {}: {} moves, {} attacks",
            hex,
            self.reachable.moves.len(),
            self.reachable.attacks.len()
        );
    }

    fn clear_interaction(&mut self) {
        self.interaction = Interaction::Idle;
        self.reachable.clear();
    }

    fn try_spawn(&mut self, kind: UnitKind, hex: Hex) -> ClickOutcome {
        let side = self.current_player();
        let cost = kind.cost();
        if !self.player(side).can_afford(cost) {
            return ClickOutcome::Ignored;
        }

        let Some(tile) = self.grid.get_mut(hex) else {
            return ClickOutcome::Ignored;
        };
        if !tile.accepts_spawn(side) {
            return ClickOutcome::Ignored;
        }

        let captured = tile.occupy(Unit::new(kind, side));
        self.players[side.index()].charge(cost);
        self.record_capture(captured);
        self.clear_interaction();

        tracing::debug!("{:?} spawned {:?} at {} for {} gold", side, kind, hex, cost);
        ClickOutcome::Spawned { hex, kind }
    }

    fn try_move(&mut self, from: Hex, to: Hex) -> Option<ClickOutcome> {
        let cost = self.reachable.moves.get(&to)?.len() as u32;
        if !self.relocate(from, to, cost) {
            return None;
        }
        self.clear_interaction();

        tracing::debug!("Moved {} -> {} ({} moves)", from, to, cost);
        Some(ClickOutcome::Moved { from, to })
    }

    fn try_attack(&mut self, from: Hex, target: Hex) -> Option<ClickOutcome> {
        let path = self.reachable.attacks.get(&target)?;
        let side = self.current_player();
        if !self.grid.get(target).is_some_and(|tile| tile.is_attackable_by(side)) {
            return None;
        }

        let staging = path.truncated();
        let (staging_hex, cost) = (staging.destination(), staging.len() as u32);
        if !self.relocate(from, staging_hex, cost) {
            return None;
        }

        // Both units are in place now; combat always resolves past this point
        debug_assert!(self.unit(staging_hex).is_some() && self.unit(target).is_some());
        let report = self.resolve_combat(staging_hex, target)?;
        self.clear_interaction();

        tracing::info!(
            "{:?} attacked {} from {}: dealt {}, took {}{}{}",
            side,
            target,
            staging_hex,
            report.defender_damage,
            report.attacker_damage,
            if report.defender_destroyed { ", defender destroyed" } else { "" },
            if report.attacker_destroyed { ", attacker destroyed" } else { "" },
        );
        Some(ClickOutcome::Attacked {
            from,
            target,
            report,
        })
    }

    /// Move the unit on `from` to `to`, spending `cost` moves. Moving onto the
    /// tile it already stands on re-runs the move-in rules.
    fn relocate(&mut self, from: Hex, to: Hex, cost: u32) -> bool {
        if from != to && !self.grid.get(to).is_some_and(Tile::is_moveable) {
            return false;
        }
        let Some(unit) = self.grid.get_mut(from).and_then(Tile::unit_mut) else {
            return false;
        };
        if let Err(e) = unit.use_moves(cost) {
            tracing::warn!("Rejected move {} -> {}: {}", from, to, e);
            return false;
        }

        let Some(unit) = self.grid.get_mut(from).and_then(Tile::take_unit) else {
            return false;
        };
        let captured = match self.grid.get_mut(to) {
            Some(tile) => tile.occupy(unit),
            None => return false,
        };
        self.record_capture(captured);
        true
    }

    /// Exchange fire between the units on `attacker_hex` and `defender_hex`,
    /// then clear away the dead and advance a surviving attacker.
    fn resolve_combat(&mut self, attacker_hex: Hex, defender_hex: Hex) -> Option<CombatReport> {
        let mut attacker = self.grid.get_mut(attacker_hex).and_then(Tile::take_unit)?;
        let Some(mut defender) = self.grid.get_mut(defender_hex).and_then(Tile::take_unit) else {
            if let Some(tile) = self.grid.get_mut(attacker_hex) {
                tile.put_back(attacker);
            }
            return None;
        };

        let report = exchange_fire(&mut attacker, &mut defender, self.combat_margin, &mut self.rng);

        if report.defender_destroyed {
            self.bury(defender_hex, defender);
        } else if let Some(tile) = self.grid.get_mut(defender_hex) {
            tile.put_back(defender);
        }

        if report.attacker_destroyed {
            self.bury(attacker_hex, attacker);
            return Some(report);
        }

        attacker.exhaust_moves();
        if report.defender_destroyed {
            if let Some(tile) = self.grid.get_mut(defender_hex) {
                let captured = tile.occupy(attacker);
                self.record_capture(captured);
            }
        } else if let Some(tile) = self.grid.get_mut(attacker_hex) {
            tile.put_back(attacker);
        }
        Some(report)
    }

    /// Remove a dead unit, leaving any carried flag on its tile
    fn bury(&mut self, hex: Hex, mut unit: Unit) {
        tracing::debug!("{:?} {:?} destroyed at {}", unit.owner(), unit.kind(), hex);
        if let (Some(flag), Some(tile)) = (unit.drop_flag(), self.grid.get_mut(hex)) {
            tile.drop_flag(flag);
        }
    }

    fn record_capture(&mut self, captured: Option<Side>) {
        if let (Some(side), None) = (captured, self.winner) {
            tracing::info!("{:?} captured the flag on turn {} and wins", side, self.turn);
            self.winner = Some(side);
        }
    }
}
