//! Scenario loader.
//!
//! RON layout:
//!
//! ```ron
//! (
//!     name: "river_ford",
//!     dimensions: (15, 15),
//!     terrain: Tiles(base: Plain, tiles: [(7, 3, River), (2, 2, Castle)]),
//!     units: [
//!         (id: 1, name: "Aldric", side: Player, position: (13, 1), attack: 30, defense: 20),
//!         (id: 2, name: "Gorr", side: Enemy, position: (3, 12), movement: 6, range: (1, 2)),
//!     ],
//! )
//! ```
//!
//! Unit stats left out take the baseline values of [`Unit::new`]. Optional
//! stats may be written bare (`attack: 30`) or wrapped (`attack: Some(30)`).

use std::path::Path;

use ron::extensions::Extensions;
use serde::Deserialize;
use tactics_core::{
    AttackRange, Facing, GridDimensions, Position, Scenario, Side, TerrainKind, TerrainSpec,
    TerrainTile, Unit, UnitCapabilities, UnitId,
};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioRon {
    name: String,
    /// (rows, cols)
    #[serde(default = "standard_dimensions")]
    dimensions: (u32, u32),
    #[serde(default)]
    terrain: TerrainRon,
    units: Vec<UnitRon>,
}

#[derive(Debug, Clone, Default, Deserialize)]
enum TerrainRon {
    #[default]
    Plain,
    Uniform(TerrainKind),
    Generated {
        seed: u64,
    },
    Tiles {
        #[serde(default)]
        base: TerrainKind,
        /// (row, col, kind)
        tiles: Vec<(i32, i32, TerrainKind)>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitRon {
    id: u32,
    name: String,
    side: Side,
    /// (row, col)
    position: (i32, i32),
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    hp: Option<u32>,
    #[serde(default)]
    attack: Option<i32>,
    #[serde(default)]
    defense: Option<i32>,
    #[serde(default)]
    movement: Option<u32>,
    #[serde(default)]
    skill: Option<i32>,
    #[serde(default)]
    evasion: Option<i32>,
    /// (min, max)
    #[serde(default)]
    range: Option<(u32, u32)>,
    #[serde(default)]
    flying: bool,
    #[serde(default)]
    facing: Facing,
}

fn standard_dimensions() -> (u32, u32) {
    (GridDimensions::STANDARD.rows, GridDimensions::STANDARD.cols)
}

impl From<TerrainRon> for TerrainSpec {
    fn from(terrain: TerrainRon) -> Self {
        match terrain {
            TerrainRon::Plain => TerrainSpec::Uniform(TerrainKind::Plain),
            TerrainRon::Uniform(kind) => TerrainSpec::Uniform(kind),
            TerrainRon::Generated { seed } => TerrainSpec::Generated { seed },
            TerrainRon::Tiles { base, tiles } => TerrainSpec::Explicit {
                base,
                tiles: tiles
                    .into_iter()
                    .map(|(row, col, kind)| TerrainTile {
                        position: Position::new(row, col),
                        kind,
                    })
                    .collect(),
            },
        }
    }
}

impl From<UnitRon> for Unit {
    fn from(spec: UnitRon) -> Self {
        let mut unit = Unit::new(
            UnitId(spec.id),
            spec.name,
            spec.side,
            Position::new(spec.position.0, spec.position.1),
        )
        .with_facing(spec.facing);

        if let Some(class) = spec.class {
            unit = unit.with_class(class);
        }
        if let Some(hp) = spec.hp {
            unit = unit.with_hp(hp);
        }
        if let Some(attack) = spec.attack {
            unit = unit.with_attack(attack);
        }
        if let Some(defense) = spec.defense {
            unit = unit.with_defense(defense);
        }
        if let Some(movement) = spec.movement {
            unit = unit.with_movement(movement);
        }
        if let Some(skill) = spec.skill {
            unit = unit.with_skill(skill);
        }
        if let Some(evasion) = spec.evasion {
            unit = unit.with_evasion(evasion);
        }
        if let Some((min, max)) = spec.range {
            unit.attack_range = AttackRange::new(min, max);
        }
        if spec.flying {
            unit = unit.with_capabilities(UnitCapabilities::FLYING);
        }
        unit
    }
}

/// Loader for battle scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    /// Parse and validate scenario RON text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let (rows, cols) = data.dimensions;
        let scenario = Scenario {
            name: data.name,
            dimensions: GridDimensions::new(rows, cols),
            terrain: data.terrain.into(),
            units: data.units.into_iter().map(Unit::from).collect(),
        };
        scenario
            .validate()
            .map_err(|e| anyhow::anyhow!("Scenario '{}' rejected: {}", scenario.name, e))?;
        Ok(scenario)
    }
}
