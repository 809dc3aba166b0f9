use std::ops::RangeInclusive;

use crate::state::{AttackRange, GridDimensions, Position};

/// Cells whose Manhattan distance from `origin` lies within `range`.
///
/// The origin itself is never included, even when `range.min` is 0. Cells
/// are clipped to the grid and returned in row-major order.
pub fn attack_cells(origin: Position, range: AttackRange, dimensions: GridDimensions) -> Vec<Position> {
    let mut cells = Vec::new();
    let Some((rows, cols)) = clipped_window(origin, range.max, dimensions) else {
        return cells;
    };
    for row in rows {
        for col in cols.clone() {
            let cell = Position::new(row, col);
            if cell != origin && range.contains(origin.manhattan(cell)) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Row and column spans of the square of radius `reach` around `origin`,
/// intersected with the grid.
fn clipped_window(
    origin: Position,
    reach: u32,
    dimensions: GridDimensions,
) -> Option<(RangeInclusive<i32>, RangeInclusive<i32>)> {
    let span = |center: i32, extent: u32| {
        let low = (i64::from(center) - i64::from(reach)).max(0);
        let high = (i64::from(center) + i64::from(reach)).min(i64::from(extent) - 1);
        let low = i32::try_from(low).ok()?;
        let high = i32::try_from(high.min(i64::from(i32::MAX))).ok()?;
        (low <= high).then_some(low..=high)
    };
    Some((span(origin.row, dimensions.rows)?, span(origin.col, dimensions.cols)?))
}
