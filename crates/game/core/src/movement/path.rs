//! A* pathfinding over the 4-connected terrain grid.
//!
//! Step cost is the destination terrain's move cost (1 for flying units) and
//! the heuristic is Manhattan distance, which never overestimates because the
//! cheapest step costs 1. The movement budget is deliberately ignored here:
//! callers check affordability against the reachable set.

use std::collections::{HashMap, HashSet};

use crate::env::TerrainMap;
use crate::state::{Position, Roster, Unit};

/// Entry in the open list.
#[derive(Clone, Copy, Debug)]
struct OpenNode {
    position: Position,
    g: u32,
    f: u32,
}

/// Cheapest route from `start` to `end` inclusive, or `None` when unreachable.
///
/// Cells held by living units other than `unit` block the search, except the
/// destination itself (so a route *to* an enemy can be planned). The open list
/// is scanned linearly for the lowest `g + h`; equal scores resolve to the
/// earliest discovered node.
pub fn find_path(
    start: Position,
    end: Position,
    terrain: &TerrainMap,
    roster: &Roster,
    unit: &Unit,
) -> Option<Vec<Position>> {
    let dimensions = terrain.dimensions();
    if !dimensions.contains(start) || !dimensions.contains(end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut open = vec![OpenNode {
        position: start,
        g: 0,
        f: start.manhattan(end),
    }];
    let mut g_scores: HashMap<Position, u32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();

    while let Some(index) = lowest_score(&open) {
        let current = open.remove(index);
        if current.position == end {
            return Some(reconstruct_path(&came_from, end));
        }
        closed.insert(current.position);

        for next in current.position.neighbors() {
            if !dimensions.contains(next) || closed.contains(&next) {
                continue;
            }
            if next != end && roster.is_blocked_for(next, unit.id) {
                continue;
            }

            let tentative = current.g + unit.step_cost(terrain.profile(next));
            if g_scores.get(&next).is_some_and(|&known| tentative >= known) {
                continue;
            }

            came_from.insert(next, current.position);
            g_scores.insert(next, tentative);
            let f = tentative + next.manhattan(end);

            match open.iter_mut().find(|node| node.position == next) {
                Some(node) => {
                    node.g = tentative;
                    node.f = f;
                }
                None => open.push(OpenNode {
                    position: next,
                    g: tentative,
                    f,
                }),
            }
        }
    }

    None
}

/// Movement points spent walking `path` (the start cell is free).
pub fn path_cost(path: &[Position], terrain: &TerrainMap, unit: &Unit) -> u32 {
    path.iter()
        .skip(1)
        .map(|&cell| unit.step_cost(terrain.profile(cell)))
        .sum()
}

fn lowest_score(open: &[OpenNode]) -> Option<usize> {
    // min_by_key keeps the first of equal minimums
    open.iter()
        .enumerate()
        .min_by_key(|(_, node)| node.f)
        .map(|(index, _)| index)
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut path = vec![current];
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{GridDimensions, Side, UnitCapabilities, UnitId};

    fn plain() -> TerrainMap {
        TerrainMap::uniform(GridDimensions::STANDARD, TerrainKind::Plain)
    }

    fn knight(position: Position) -> Unit {
        Unit::new(UnitId(1), "Knight", Side::Player, position)
    }

    #[test]
    fn straight_path_on_plain_terrain() {
        let unit = knight(Position::new(13, 1));
        let terrain = plain();
        let roster = Roster::new(vec![unit.clone()]);

        let path = find_path(
            Position::new(13, 1),
            Position::new(13, 6),
            &terrain,
            &roster,
            &unit,
        )
        .expect("path on empty plain");

        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&Position::new(13, 1)));
        assert_eq!(path.last(), Some(&Position::new(13, 6)));
        assert!(path.iter().all(|cell| cell.row == 13));
        assert_eq!(path_cost(&path, &terrain, &unit), 5);
    }

    #[test]
    fn start_equals_end_is_single_cell() {
        let unit = knight(Position::new(2, 2));
        let roster = Roster::new(vec![unit.clone()]);
        let path = find_path(unit.position, unit.position, &plain(), &roster, &unit);
        assert_eq!(path, Some(vec![Position::new(2, 2)]));
    }

    #[test]
    fn routes_around_expensive_terrain() {
        // Mountain wall in column 1 except a gap at row 4.
        let dims = GridDimensions::new(5, 3);
        let walls = (0..4).map(|row| (Position::new(row, 1), TerrainKind::Mountain));
        let terrain = TerrainMap::from_tiles(dims, TerrainKind::Plain, walls);
        let unit = knight(Position::new(0, 0));
        let roster = Roster::new(vec![unit.clone()]);

        let path = find_path(Position::new(0, 0), Position::new(0, 2), &terrain, &roster, &unit)
            .unwrap();
        // Over the mountain: 3 + 1 = 4. Around through row 4: 10.
        assert_eq!(path_cost(&path, &terrain, &unit), 4);

        let flyer = unit.with_capabilities(UnitCapabilities::FLYING);
        let path = find_path(Position::new(0, 0), Position::new(0, 2), &terrain, &roster, &flyer)
            .unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn occupied_destination_is_allowed_but_occupied_cells_block() {
        let unit = knight(Position::new(0, 0));
        let enemy = Unit::new(UnitId(2), "Brigand", Side::Enemy, Position::new(0, 2));
        let dims = GridDimensions::new(1, 4);
        let terrain = TerrainMap::uniform(dims, TerrainKind::Plain);
        let roster = Roster::new(vec![unit.clone(), enemy]);

        let to_enemy = find_path(Position::new(0, 0), Position::new(0, 2), &terrain, &roster, &unit);
        assert_eq!(to_enemy.map(|path| path.len()), Some(3));

        let past_enemy = find_path(Position::new(0, 0), Position::new(0, 3), &terrain, &roster, &unit);
        assert_eq!(past_enemy, None);
    }

    #[test]
    fn out_of_bounds_endpoints_have_no_path() {
        let unit = knight(Position::new(0, 0));
        let roster = Roster::new(vec![unit.clone()]);
        assert!(find_path(unit.position, Position::new(15, 0), &plain(), &roster, &unit).is_none());
    }
}
