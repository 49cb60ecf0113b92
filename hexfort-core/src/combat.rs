//! Randomized mutual-damage combat

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Half-width of the random interval drawn around the combat bias
pub const COMBAT_MARGIN: f64 = 0.1;

/// What one exchange of fire did to both sides
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub bias: f64,
    pub attacker_damage: u32,
    pub defender_damage: u32,
    pub attacker_destroyed: bool,
    pub defender_destroyed: bool,
}

/// Uniform draw from `[bias - margin, bias + margin]`. A margin that is not
/// a finite positive number means no randomness: the bias is returned as is.
pub fn roll_multiplier<R: Rng + ?Sized>(rng: &mut R, bias: f64, margin: f64) -> f64 {
    if !margin.is_finite() || margin <= 0.0 {
        return bias;
    }
    rng.gen_range((bias - margin)..=(bias + margin)).max(0.0)
}

fn scaled_damage(strength: u32, multiplier: f64) -> u32 {
    (strength as f64 * multiplier).round().max(0.0) as u32
}

/// Resolve one exchange between two units.
///
/// Both draws use the attacker's bias against the defender's category. Each
/// side's damage taken is scaled by the other side's combat strength.
pub fn exchange_fire<R: Rng + ?Sized>(
    attacker: &mut Unit,
    defender: &mut Unit,
    margin: f64,
    rng: &mut R,
) -> CombatReport {
    let bias = attacker.bias_against(defender);
    let attacker_roll = roll_multiplier(rng, bias, margin);
    let defender_roll = roll_multiplier(rng, bias, margin);

    let attacker_damage = scaled_damage(defender.combat_strength(), attacker_roll);
    let defender_damage = scaled_damage(attacker.combat_strength(), defender_roll);

    attacker.inflict_damage(attacker_damage);
    defender.inflict_damage(defender_damage);

    CombatReport {
        bias,
        attacker_damage,
        defender_damage,
        attacker_destroyed: attacker.is_dead(),
        defender_destroyed: defender.is_dead(),
    }
}
