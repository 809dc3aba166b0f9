use bitflags::bitflags;

use crate::env::TerrainProfile;

use super::common::{Facing, Position, Side, UnitId};

bitflags! {
    /// Data-driven capability flags consumed uniformly by the planners and AI.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitCapabilities: u8 {
        /// Terrain move cost is ignored; every step costs 1.
        const FLYING = 1 << 0;
    }
}

/// Inclusive Manhattan distance band a unit can strike within.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRange {
    pub min: u32,
    pub max: u32,
}

impl AttackRange {
    pub const MELEE: Self = Self { min: 1, max: 1 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, distance: u32) -> bool {
        distance >= self.min && distance <= self.max
    }
}

impl Default for AttackRange {
    fn default() -> Self {
        Self::MELEE
    }
}

/// A combatant on the battle grid.
///
/// Defeated units (`hp == 0`) stay on the roster so identities and ordering
/// remain stable; every planner skips them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub movement: u32,
    pub skill: i32,
    pub evasion: i32,
    /// Display label for the unit class ("knight", "archer", ...).
    pub class: String,
    pub capabilities: UnitCapabilities,
    pub attack_range: AttackRange,
    pub facing: Facing,
    pub has_acted: bool,
}

impl Unit {
    /// Creates a unit with baseline stats; chain the `with_*` builders to tune it.
    pub fn new(id: UnitId, name: impl Into<String>, side: Side, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            position,
            hp: 20,
            max_hp: 20,
            attack: 10,
            defense: 5,
            movement: 5,
            skill: 5,
            evasion: 0,
            class: String::from("soldier"),
            capabilities: UnitCapabilities::empty(),
            attack_range: AttackRange::MELEE,
            facing: Facing::default(),
            has_acted: false,
        }
    }

    /// Sets both current and maximum hit points.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self.max_hp = hp;
        self
    }

    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_skill(mut self, skill: i32) -> Self {
        self.skill = skill;
        self
    }

    pub fn with_evasion(mut self, evasion: i32) -> Self {
        self.evasion = evasion;
        self
    }

    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.attack_range = AttackRange::new(min, max);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: UnitCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.capabilities.contains(UnitCapabilities::FLYING)
    }

    /// Movement points spent entering a cell with the given terrain.
    pub fn step_cost(&self, terrain: TerrainProfile) -> u32 {
        if self.is_flying() {
            1
        } else {
            terrain.move_cost
        }
    }

    /// Whether `target` sits inside this unit's attack annulus.
    pub fn can_reach(&self, target: Position) -> bool {
        target != self.position && self.attack_range.contains(self.position.manhattan(target))
    }

    /// Applies damage and returns the remaining hit points.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TerrainKind;

    #[test]
    fn flying_units_ignore_terrain_cost() {
        let walker = Unit::new(UnitId(1), "Walker", Side::Player, Position::ORIGIN);
        let flyer = walker.clone().with_capabilities(UnitCapabilities::FLYING);
        let mountain = TerrainKind::Mountain.profile();

        assert_eq!(walker.step_cost(mountain), mountain.move_cost);
        assert_eq!(flyer.step_cost(mountain), 1);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut unit = Unit::new(UnitId(1), "Scout", Side::Enemy, Position::ORIGIN).with_hp(7);
        assert_eq!(unit.take_damage(3), 4);
        assert_eq!(unit.take_damage(40), 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn can_reach_excludes_own_cell() {
        let archer = Unit::new(UnitId(1), "Archer", Side::Player, Position::new(5, 5))
            .with_range(0, 2);
        assert!(!archer.can_reach(Position::new(5, 5)));
        assert!(archer.can_reach(Position::new(5, 7)));
        assert!(!archer.can_reach(Position::new(5, 8)));
    }
}
