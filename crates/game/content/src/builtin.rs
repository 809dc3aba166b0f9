//! Scenarios compiled into the crate.
//!
//! `skirmish` is the fixed reference battle: an all-plain 15x15 grid with one
//! unit per side. `crossing` exercises terrain, ranged and flying units.

use tactics_core::{
    Facing, GridDimensions, Position, Scenario, Side, TerrainKind, TerrainSpec, TerrainTile, Unit,
    UnitCapabilities, UnitId,
};

/// Names accepted by [`builtin_scenario`].
pub const BUILTIN_SCENARIOS: &[&str] = &["skirmish", "crossing"];

/// Looks up a built-in scenario by name.
pub fn builtin_scenario(name: &str) -> Option<Scenario> {
    match name {
        "skirmish" => Some(skirmish()),
        "crossing" => Some(crossing()),
        _ => None,
    }
}

pub fn skirmish() -> Scenario {
    Scenario::new("skirmish", GridDimensions::STANDARD)
        .with_terrain(TerrainSpec::Uniform(TerrainKind::Plain))
        .with_unit(
            Unit::new(UnitId(1), "Aldric", Side::Player, Position::new(13, 1))
                .with_class("knight")
                .with_hp(40)
                .with_attack(30)
                .with_defense(20)
                .with_movement(5)
                .with_skill(8)
                .with_facing(Facing::North),
        )
        .with_unit(
            Unit::new(UnitId(2), "Gorr", Side::Enemy, Position::new(3, 12))
                .with_class("brute")
                .with_hp(45)
                .with_attack(25)
                .with_defense(15)
                .with_movement(6)
                .with_skill(4),
        )
}

pub fn crossing() -> Scenario {
    let river = (0..15).filter(|col| *col != 7).map(|col| TerrainTile {
        position: Position::new(7, col),
        kind: TerrainKind::River,
    });
    let cover = [
        (10, 3, TerrainKind::Forest),
        (10, 4, TerrainKind::Forest),
        (4, 10, TerrainKind::Forest),
        (3, 3, TerrainKind::Mountain),
        (12, 11, TerrainKind::Castle),
        (1, 7, TerrainKind::Castle),
    ]
    .into_iter()
    .map(|(row, col, kind)| TerrainTile {
        position: Position::new(row, col),
        kind,
    });

    Scenario::new("crossing", GridDimensions::STANDARD)
        .with_terrain(TerrainSpec::Explicit {
            base: TerrainKind::Plain,
            tiles: river.chain(cover).collect(),
        })
        .with_unit(
            Unit::new(UnitId(1), "Aldric", Side::Player, Position::new(12, 6))
                .with_class("knight")
                .with_hp(40)
                .with_attack(28)
                .with_defense(18)
                .with_facing(Facing::North),
        )
        .with_unit(
            Unit::new(UnitId(2), "Wren", Side::Player, Position::new(13, 8))
                .with_class("archer")
                .with_hp(28)
                .with_attack(22)
                .with_defense(8)
                .with_skill(12)
                .with_range(2, 3)
                .with_facing(Facing::North),
        )
        .with_unit(
            Unit::new(UnitId(3), "Sera", Side::Player, Position::new(12, 11))
                .with_class("pegasus")
                .with_hp(30)
                .with_attack(20)
                .with_defense(10)
                .with_movement(7)
                .with_evasion(15)
                .with_capabilities(UnitCapabilities::FLYING)
                .with_facing(Facing::North),
        )
        .with_unit(
            Unit::new(UnitId(10), "Raider", Side::Enemy, Position::new(2, 5))
                .with_class("brigand")
                .with_hp(32)
                .with_attack(21)
                .with_defense(9)
                .with_movement(5),
        )
        .with_unit(
            Unit::new(UnitId(11), "Slinger", Side::Enemy, Position::new(1, 7))
                .with_class("archer")
                .with_hp(24)
                .with_attack(18)
                .with_defense(6)
                .with_range(2, 2)
                .with_movement(4),
        )
        .with_unit(
            Unit::new(UnitId(12), "Warlord", Side::Enemy, Position::new(2, 10))
                .with_class("brute")
                .with_hp(45)
                .with_attack(26)
                .with_defense(14)
                .with_movement(4),
        )
}
