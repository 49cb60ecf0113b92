//! Game constants, loadable from JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::COMBAT_MARGIN;

/// Gold each player starts with
pub const STARTING_GOLD: u32 = 10;

/// Tunable game settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_gold: u32,
    /// Half-width of the combat roll interval; 0 makes combat deterministic
    pub combat_margin: f64,
    /// Random seed for combat rolls (None = seed from entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            combat_margin: COMBAT_MARGIN,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_combat_margin(mut self, margin: f64) -> Self {
        self.combat_margin = margin;
        self
    }

    pub fn with_starting_gold(mut self, gold: u32) -> Self {
        self.starting_gold = gold;
        self
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        if config.combat_margin.is_nan() || config.combat_margin < 0.0 {
            anyhow::bail!("combat_margin must be non-negative, got {}", config.combat_margin);
        }
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
