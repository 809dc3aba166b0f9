use std::fmt;

use arrayvec::ArrayVec;

/// Unique identifier for a unit on the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed as (row, col).
///
/// Row 0 is the northern edge; row numbers grow southwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The adjacent cell one step towards `facing`.
    pub fn step(self, facing: Facing) -> Position {
        let (dr, dc) = facing.delta();
        Position::new(self.row + dr, self.col + dc)
    }

    /// The four orthogonal neighbours in north, south, west, east order.
    ///
    /// Search algorithms rely on this order for their tie-breaking.
    pub fn neighbors(self) -> ArrayVec<Position, 4> {
        Facing::ALL.iter().map(|&facing| self.step(facing)).collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal direction a unit looks towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    North,
    #[default]
    South,
    West,
    East,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::South, Facing::West, Facing::East];

    /// (row, col) offset of one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (-1, 0),
            Facing::South => (1, 0),
            Facing::West => (0, -1),
            Facing::East => (0, 1),
        }
    }

    pub const fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }

    /// Dominant direction from `from` towards `to`.
    ///
    /// The axis with the larger absolute delta wins; equal magnitudes resolve
    /// to the row axis. Identical cells resolve to the default facing.
    pub fn toward(from: Position, to: Position) -> Facing {
        let row_delta = to.row - from.row;
        let col_delta = to.col - from.col;
        if row_delta.abs() >= col_delta.abs() {
            if row_delta < 0 {
                Facing::North
            } else {
                Facing::South
            }
        } else if col_delta < 0 {
            Facing::West
        } else {
            Facing::East
        }
    }
}

/// Which army a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Enemy => "enemy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds of the battle grid. Immutable for one battle instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl GridDimensions {
    pub const STANDARD: Self = Self { rows: 15, cols: 15 };
    /// Largest side length a scenario may use.
    pub const MAX_SIDE: u32 = 255;

    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as u32) < self.rows
            && (position.col as u32) < self.cols
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.cols as usize + position.col as usize)
    }

    /// Both sides are within [`Self::MAX_SIDE`].
    pub fn is_bounded(&self) -> bool {
        self.rows <= Self::MAX_SIDE && self.cols <= Self::MAX_SIDE
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let rows = i32::try_from(self.rows).unwrap_or(i32::MAX);
        let cols = i32::try_from(self.cols).unwrap_or(i32::MAX);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}
