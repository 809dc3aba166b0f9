//! Terrain kinds and the per-battle terrain grid.

use strum::IntoEnumIterator;

use crate::state::{GridDimensions, Position};

use super::rng::{RngOracle, compute_seed};

/// Canonical terrain classes for grid cells.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Plain,
    Forest,
    Mountain,
    River,
    Castle,
}

/// Static bonuses and cost attached to a terrain kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainProfile {
    /// Percentage of incoming damage absorbed by a defender on this cell.
    pub defense_bonus: i32,
    /// Subtracted from an attacker's hit rate against a defender on this cell.
    pub evasion_bonus: i32,
    /// Movement points needed to enter the cell.
    pub move_cost: u32,
}

impl TerrainKind {
    pub const fn profile(self) -> TerrainProfile {
        let (defense_bonus, evasion_bonus, move_cost) = match self {
            TerrainKind::Plain => (0, 0, 1),
            TerrainKind::Forest => (20, 15, 2),
            TerrainKind::Mountain => (30, 10, 3),
            TerrainKind::River => (0, -10, 3),
            TerrainKind::Castle => (40, 20, 1),
        };
        TerrainProfile {
            defense_bonus,
            evasion_bonus,
            move_cost,
        }
    }

    /// Relative frequency when generating a battlefield.
    pub const fn generation_weight(self) -> u32 {
        match self {
            TerrainKind::Plain => 60,
            TerrainKind::Forest => 18,
            TerrainKind::Mountain => 10,
            TerrainKind::River => 8,
            TerrainKind::Castle => 4,
        }
    }

    fn total_weight() -> u32 {
        TerrainKind::iter().map(TerrainKind::generation_weight).sum()
    }

    /// Maps a draw in `[0, total_weight)` onto the cumulative weight table.
    fn from_draw(draw: u32) -> TerrainKind {
        let mut cumulative = 0;
        for kind in TerrainKind::iter() {
            cumulative += kind.generation_weight();
            if draw < cumulative {
                return kind;
            }
        }
        TerrainKind::Plain
    }
}

/// One cell of the terrain grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainTile {
    pub position: Position,
    pub kind: TerrainKind,
}

impl TerrainTile {
    pub fn profile(self) -> TerrainProfile {
        self.kind.profile()
    }
}

/// Dense terrain grid for one battle.
///
/// Lookups are total: any position without an explicit tile, including
/// positions off the grid, resolves to plain terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainMap {
    dimensions: GridDimensions,
    tiles: Vec<TerrainKind>,
}

/// Context tag separating terrain draws from combat rolls sharing a seed.
const TERRAIN_CONTEXT: u32 = 0x7e44;

impl TerrainMap {
    /// Every cell set to the same terrain kind.
    pub fn uniform(dimensions: GridDimensions, kind: TerrainKind) -> Self {
        Self {
            dimensions,
            tiles: vec![kind; dimensions.cell_count()],
        }
    }

    /// Independent weighted draw for each cell.
    pub fn generate(dimensions: GridDimensions, seed: u64, rng: &dyn RngOracle) -> Self {
        let total = TerrainKind::total_weight();
        let tiles = (0..dimensions.cell_count())
            .map(|index| {
                let draw = rng.below(compute_seed(seed, index as u64, 0, TERRAIN_CONTEXT), total);
                TerrainKind::from_draw(draw)
            })
            .collect();
        let map = Self { dimensions, tiles };
        tracing::debug!(
            rows = dimensions.rows,
            cols = dimensions.cols,
            seed,
            plain = map.count(TerrainKind::Plain),
            "generated terrain"
        );
        map
    }

    /// Plain grid with explicit overrides. Out-of-bounds tiles are ignored.
    pub fn from_tiles(
        dimensions: GridDimensions,
        base: TerrainKind,
        tiles: impl IntoIterator<Item = (Position, TerrainKind)>,
    ) -> Self {
        let mut map = Self::uniform(dimensions, base);
        for (position, kind) in tiles {
            map.set(position, kind);
        }
        map
    }

    /// Overrides a single cell. Returns false when `position` is off the grid.
    pub fn set(&mut self, position: Position, kind: TerrainKind) -> bool {
        match self.dimensions.index(position) {
            Some(index) => {
                self.tiles[index] = kind;
                true
            }
            None => false,
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn kind(&self, position: Position) -> TerrainKind {
        self.dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or_default()
    }

    pub fn tile(&self, position: Position) -> TerrainTile {
        TerrainTile {
            position,
            kind: self.kind(position),
        }
    }

    pub fn profile(&self, position: Position) -> TerrainProfile {
        self.kind(position).profile()
    }

    pub fn count(&self, kind: TerrainKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn missing_tiles_default_to_plain() {
        let map = TerrainMap::from_tiles(
            GridDimensions::new(3, 3),
            TerrainKind::Plain,
            [(Position::new(1, 1), TerrainKind::Forest)],
        );
        assert_eq!(map.kind(Position::new(1, 1)), TerrainKind::Forest);
        assert_eq!(map.kind(Position::new(0, 2)), TerrainKind::Plain);
        assert_eq!(map.kind(Position::new(-4, 9)), TerrainKind::Plain);
        assert_eq!(map.profile(Position::new(7, 7)), TerrainKind::Plain.profile());
    }

    #[test]
    fn plain_profile_is_neutral() {
        let plain = TerrainKind::Plain.profile();
        assert_eq!(plain.defense_bonus, 0);
        assert_eq!(plain.evasion_bonus, 0);
        assert_eq!(plain.move_cost, 1);
    }

    #[test]
    fn cumulative_table_covers_every_kind() {
        assert_eq!(TerrainKind::total_weight(), 100);
        assert_eq!(TerrainKind::from_draw(0), TerrainKind::Plain);
        assert_eq!(TerrainKind::from_draw(59), TerrainKind::Plain);
        assert_eq!(TerrainKind::from_draw(60), TerrainKind::Forest);
        assert_eq!(TerrainKind::from_draw(78), TerrainKind::Mountain);
        assert_eq!(TerrainKind::from_draw(88), TerrainKind::River);
        assert_eq!(TerrainKind::from_draw(99), TerrainKind::Castle);
    }

    #[test]
    fn generation_is_reproducible_and_plain_dominant() {
        let dims = GridDimensions::STANDARD;
        let first = TerrainMap::generate(dims, 1234, &PcgRng);
        let second = TerrainMap::generate(dims, 1234, &PcgRng);
        assert_eq!(first, second);
        assert!(first.count(TerrainKind::Plain) > dims.cell_count() / 3);
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut map = TerrainMap::uniform(GridDimensions::new(2, 2), TerrainKind::Plain);
        assert!(!map.set(Position::new(2, 0), TerrainKind::Castle));
        assert!(map.set(Position::new(1, 0), TerrainKind::Castle));
        assert_eq!(map.kind(Position::new(1, 0)), TerrainKind::Castle);
    }
}
