//! Hit chance calculations.

use crate::config::BattleConfig;
use crate::env::TerrainMap;
use crate::state::Unit;

/// Calculate the percentage chance that a strike lands.
///
/// # Formula
///
/// ```text
/// hit = 90 + (attacker.skill - defender.skill)
///          - defender_terrain_evasion_bonus
///          - defender.evasion
///          + (30 if backstab)
/// clamped to [10, 100]
/// ```
pub fn calculate_hit_rate(
    attacker: &Unit,
    defender: &Unit,
    terrain: &TerrainMap,
    is_backstab: bool,
) -> u32 {
    let terrain_evasion = terrain.profile(defender.position).evasion_bonus;
    let backstab_bonus = if is_backstab {
        BattleConfig::BACKSTAB_HIT_BONUS
    } else {
        0
    };

    let hit = BattleConfig::BASE_HIT_RATE + (attacker.skill - defender.skill)
        - terrain_evasion
        - defender.evasion
        + backstab_bonus;

    hit.clamp(BattleConfig::MIN_HIT_RATE, BattleConfig::MAX_HIT_RATE) as u32
}

/// A strike lands when the d100 roll does not exceed the hit rate.
pub fn check_hit(hit_rate: u32, roll: u32) -> bool {
    roll <= hit_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{GridDimensions, Position, Side, UnitId};

    fn duel(attacker_skill: i32, defender_skill: i32, evasion: i32) -> (Unit, Unit) {
        (
            Unit::new(UnitId(1), "Attacker", Side::Player, Position::new(3, 3))
                .with_skill(attacker_skill),
            Unit::new(UnitId(2), "Defender", Side::Enemy, Position::new(3, 4))
                .with_skill(defender_skill)
                .with_evasion(evasion),
        )
    }

    #[test]
    fn base_rate_with_even_stats() {
        let (attacker, defender) = duel(5, 5, 0);
        let terrain = TerrainMap::uniform(GridDimensions::STANDARD, TerrainKind::Plain);
        assert_eq!(calculate_hit_rate(&attacker, &defender, &terrain, false), 90);
        assert_eq!(calculate_hit_rate(&attacker, &defender, &terrain, true), 100);
    }

    #[test]
    fn terrain_and_unit_evasion_subtract() {
        let (attacker, defender) = duel(8, 5, 10);
        let terrain = TerrainMap::from_tiles(
            GridDimensions::STANDARD,
            TerrainKind::Plain,
            [(Position::new(3, 4), TerrainKind::Forest)],
        );
        // 90 + 3 - 15 - 10
        assert_eq!(calculate_hit_rate(&attacker, &defender, &terrain, false), 68);
    }

    #[test]
    fn river_raises_hit_rate() {
        let (attacker, defender) = duel(5, 5, 0);
        let terrain = TerrainMap::from_tiles(
            GridDimensions::STANDARD,
            TerrainKind::Plain,
            [(Position::new(3, 4), TerrainKind::River)],
        );
        assert_eq!(calculate_hit_rate(&attacker, &defender, &terrain, false), 100);
    }

    #[test]
    fn rate_is_clamped() {
        let terrain = TerrainMap::uniform(GridDimensions::STANDARD, TerrainKind::Plain);
        let (attacker, defender) = duel(0, 200, 50);
        assert_eq!(calculate_hit_rate(&attacker, &defender, &terrain, false), 10);
        let (attacker, defender) = duel(200, 0, 0);
        assert_eq!(calculate_hit_rate(&attacker, &defender, &terrain, true), 100);
    }

    #[test]
    fn roll_equal_to_rate_hits() {
        assert!(check_hit(70, 70));
        assert!(!check_hit(70, 71));
    }
}
