//! Battle setup data supplied by the host.
//!
//! A [`Scenario`] carries everything that differs between battles: grid
//! size, how terrain is produced and the initial roster. It is consumed once
//! by [`crate::engine::Battle::new`] and not retained afterwards.

use std::collections::HashSet;

use crate::engine::SetupError;
use crate::env::{RngOracle, TerrainKind, TerrainMap, TerrainTile};
use crate::state::{GridDimensions, Side, Unit};

/// How the terrain grid of a scenario is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainSpec {
    /// Every cell has the same kind.
    Uniform(TerrainKind),
    /// Weighted random draw per cell.
    Generated { seed: u64 },
    /// `base` everywhere except the listed tiles.
    Explicit {
        base: TerrainKind,
        tiles: Vec<TerrainTile>,
    },
}

impl Default for TerrainSpec {
    fn default() -> Self {
        TerrainSpec::Uniform(TerrainKind::Plain)
    }
}

/// Initial state of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    pub dimensions: GridDimensions,
    pub terrain: TerrainSpec,
    /// Roster order is kept as given; it drives enemy scheduling.
    pub units: Vec<Unit>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, dimensions: GridDimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
            terrain: TerrainSpec::default(),
            units: Vec::new(),
        }
    }

    pub fn with_terrain(mut self, terrain: TerrainSpec) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn build_terrain(&self, rng: &dyn RngOracle) -> TerrainMap {
        match &self.terrain {
            TerrainSpec::Uniform(kind) => TerrainMap::uniform(self.dimensions, *kind),
            TerrainSpec::Generated { seed } => TerrainMap::generate(self.dimensions, *seed, rng),
            TerrainSpec::Explicit { base, tiles } => TerrainMap::from_tiles(
                self.dimensions,
                *base,
                tiles.iter().map(|tile| (tile.position, tile.kind)),
            ),
        }
    }

    /// Checks the roster against the grid.
    ///
    /// Rejects oversized or empty grids, empty rosters, duplicate ids, units
    /// off the grid, inconsistent stats, living units sharing a cell and sides
    /// without a living unit.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.dimensions.is_bounded() {
            return Err(SetupError::GridTooLarge {
                rows: self.dimensions.rows,
                cols: self.dimensions.cols,
                max: GridDimensions::MAX_SIDE,
            });
        }
        if self.dimensions.cell_count() == 0 {
            return Err(SetupError::EmptyGrid);
        }
        if self.units.is_empty() {
            return Err(SetupError::EmptyRoster);
        }

        let mut ids = HashSet::new();
        let mut occupied = Vec::new();
        for unit in &self.units {
            if !ids.insert(unit.id) {
                return Err(SetupError::DuplicateUnit(unit.id));
            }
            if !self.dimensions.contains(unit.position) {
                return Err(SetupError::OutOfBounds {
                    unit: unit.id,
                    position: unit.position,
                });
            }
            if unit.max_hp == 0 || unit.hp > unit.max_hp {
                return Err(SetupError::InvalidStats {
                    unit: unit.id,
                    reason: "hp must be within 0..=max_hp and max_hp positive",
                });
            }
            if unit.attack_range.min > unit.attack_range.max {
                return Err(SetupError::InvalidStats {
                    unit: unit.id,
                    reason: "attack range min exceeds max",
                });
            }
            if !unit.is_alive() {
                continue;
            }
            if let Some(&(other, _)) = occupied
                .iter()
                .find(|(_, position)| *position == unit.position)
            {
                return Err(SetupError::Overlap {
                    first: other,
                    second: unit.id,
                    position: unit.position,
                });
            }
            occupied.push((unit.id, unit.position));
        }

        for side in [Side::Player, Side::Enemy] {
            if !self.units.iter().any(|unit| unit.side == side && unit.is_alive()) {
                return Err(SetupError::MissingSide(side));
            }
        }
        Ok(())
    }
}
