//! Combat previews.

use crate::env::TerrainMap;
use crate::state::{Unit, UnitId};

use super::damage::calculate_damage;
use super::facing::is_backstab;
use super::hit::calculate_hit_rate;

/// Predicted numbers for one strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeForecast {
    pub damage: u32,
    pub hit_rate: u32,
    pub backstab: bool,
    /// The strike would defeat its target if it lands.
    pub lethal: bool,
}

/// Preview of a full exchange: the attack and the counter it may provoke.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatForecast {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub strike: StrikeForecast,
    /// Present when the defender has the attacker inside its own range.
    /// The counter only happens if the defender survives the strike.
    pub counter: Option<StrikeForecast>,
}

/// Whether `defender` may retaliate against `attacker` from where they stand.
pub fn can_counter(attacker: &Unit, defender: &Unit) -> bool {
    defender.is_alive() && defender.can_reach(attacker.position)
}

/// Builds the preview for `attacker` striking `defender` from the current cells.
///
/// Counter strikes are never backstabs.
pub fn forecast(attacker: &Unit, defender: &Unit, terrain: &TerrainMap) -> CombatForecast {
    let backstab = is_backstab(attacker.position, defender.position, defender.facing);
    let damage = calculate_damage(attacker, defender, terrain, false, backstab);
    let strike = StrikeForecast {
        damage,
        hit_rate: calculate_hit_rate(attacker, defender, terrain, backstab),
        backstab,
        lethal: damage >= defender.hp,
    };

    let counter = can_counter(attacker, defender).then(|| {
        let damage = calculate_damage(defender, attacker, terrain, true, false);
        StrikeForecast {
            damage,
            hit_rate: calculate_hit_rate(defender, attacker, terrain, false),
            backstab: false,
            lethal: damage >= attacker.hp,
        }
    });

    CombatForecast {
        attacker: attacker.id,
        defender: defender.id,
        strike,
        counter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{Facing, GridDimensions, Position, Side};

    fn plain() -> TerrainMap {
        TerrainMap::uniform(GridDimensions::STANDARD, TerrainKind::Plain)
    }

    #[test]
    fn melee_exchange_includes_counter() {
        let attacker = Unit::new(UnitId(1), "Knight", Side::Player, Position::new(5, 5))
            .with_hp(40)
            .with_attack(30)
            .with_defense(20);
        let defender = Unit::new(UnitId(2), "Brute", Side::Enemy, Position::new(5, 6))
            .with_hp(40)
            .with_attack(25)
            .with_defense(15)
            .with_facing(Facing::West);

        let preview = forecast(&attacker, &defender, &plain());
        assert_eq!(preview.strike.damage, 15);
        assert!(!preview.strike.backstab);
        let counter = preview.counter.expect("adjacent melee defender counters");
        // floor(5 * 0.8)
        assert_eq!(counter.damage, 4);
        assert!(!counter.backstab);
    }

    #[test]
    fn archer_out_of_melee_reach_gets_no_counter() {
        let archer = Unit::new(UnitId(1), "Archer", Side::Player, Position::new(5, 5)).with_range(2, 2);
        let brute = Unit::new(UnitId(2), "Brute", Side::Enemy, Position::new(5, 7));
        assert!(forecast(&archer, &brute, &plain()).counter.is_none());
    }

    #[test]
    fn attacking_from_behind_is_flagged() {
        let attacker = Unit::new(UnitId(1), "Rogue", Side::Player, Position::new(4, 5));
        let defender = Unit::new(UnitId(2), "Guard", Side::Enemy, Position::new(5, 5))
            .with_facing(Facing::South);
        let preview = forecast(&attacker, &defender, &plain());
        assert!(preview.strike.backstab);
        assert_eq!(preview.strike.hit_rate, 100);
    }

    #[test]
    fn lethal_flag_tracks_remaining_hp() {
        let attacker = Unit::new(UnitId(1), "Knight", Side::Player, Position::new(5, 5)).with_attack(30);
        let mut defender = Unit::new(UnitId(2), "Scout", Side::Enemy, Position::new(5, 6)).with_defense(0);
        defender.hp = 30;
        assert!(forecast(&attacker, &defender, &plain()).strike.lethal);
        defender.hp = 31;
        assert!(!forecast(&attacker, &defender, &plain()).strike.lethal);
    }
}
