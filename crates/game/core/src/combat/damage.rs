//! Damage calculation.

use crate::config::BattleConfig;
use crate::env::TerrainMap;
use crate::state::Unit;

/// Calculate damage dealt by one strike.
///
/// # Formula
///
/// ```text
/// raw          = attacker.attack - defender.defense
/// backstab     = 1.5 if backstab else 1.0
/// counter      = 0.8 if counter else 1.0
/// terrain      = (100 - defender_terrain_defense_bonus) / 100
/// final_damage = max(1, floor(raw * backstab * counter * terrain))
/// ```
///
/// The multipliers are applied as exact fractions over a common denominator
/// so the floor never suffers from binary rounding.
pub fn calculate_damage(
    attacker: &Unit,
    defender: &Unit,
    terrain: &TerrainMap,
    is_counter: bool,
    is_backstab: bool,
) -> u32 {
    let raw = attacker.attack as i64 - defender.defense as i64;
    let defense_bonus = terrain.profile(defender.position).defense_bonus;
    scale_damage(raw, defense_bonus, is_counter, is_backstab)
}

/// Applies the multipliers and the damage floor to a raw attack-defense delta.
pub fn scale_damage(raw: i64, terrain_defense_bonus: i32, is_counter: bool, is_backstab: bool) -> u32 {
    let (backstab_num, backstab_den) = if is_backstab {
        BattleConfig::BACKSTAB_DAMAGE
    } else {
        (1, 1)
    };
    let (counter_num, counter_den) = if is_counter {
        BattleConfig::COUNTER_DAMAGE
    } else {
        (1, 1)
    };
    let terrain_keep = 100 - terrain_defense_bonus as i64;

    let numerator = raw * backstab_num * counter_num * terrain_keep;
    let denominator = backstab_den * counter_den * 100;
    let damage = numerator.div_euclid(denominator);

    damage.max(BattleConfig::MIN_DAMAGE as i64) as u32
}
