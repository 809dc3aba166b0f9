//! Budgeted reachability ("move range").
//!
//! Two strategies share the [`ReachStrategy`] interface:
//!
//! - [`FifoReach`] expands cells first-come-first-served and locks each cell
//!   in at the cost of the first path that reaches it. On mixed terrain this
//!   is not the cheapest cost, so the reported set can differ from true
//!   budget reachability, and a larger budget can even drop a cell that a
//!   smaller one reached. It is the default for balance compatibility.
//! - [`CheapestReach`] settles cells in cost order and reports exactly the
//!   cells whose cheapest route fits the budget.
//!
//! Both exclude the origin, skip cells held by other living units and treat
//! flying units as paying 1 per step.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::env::TerrainMap;
use crate::state::{Position, Roster, Unit};

/// A cell a unit can end its move on, with the movement spent to get there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachableCell {
    pub position: Position,
    pub cost: u32,
}

/// Selects the reachability algorithm used by the orchestrator and AI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReachMode {
    #[default]
    Fifo,
    Cheapest,
}

impl ReachMode {
    pub fn strategy(self) -> &'static dyn ReachStrategy {
        match self {
            ReachMode::Fifo => &FifoReach,
            ReachMode::Cheapest => &CheapestReach,
        }
    }

    pub fn reachable(self, unit: &Unit, terrain: &TerrainMap, roster: &Roster) -> Vec<ReachableCell> {
        self.strategy().reachable(unit, terrain, roster)
    }
}

/// Computes the cells a unit may legally move to this turn.
pub trait ReachStrategy: Send + Sync {
    fn reachable(&self, unit: &Unit, terrain: &TerrainMap, roster: &Roster) -> Vec<ReachableCell>;
}

/// Default move range: first-come-first-served expansion.
pub fn move_range(unit: &Unit, terrain: &TerrainMap, roster: &Roster) -> Vec<ReachableCell> {
    FifoReach.reachable(unit, terrain, roster)
}

/// Breadth-first expansion with visited-marking at enqueue time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FifoReach;

impl ReachStrategy for FifoReach {
    fn reachable(&self, unit: &Unit, terrain: &TerrainMap, roster: &Roster) -> Vec<ReachableCell> {
        let dimensions = terrain.dimensions();
        let origin = unit.position;

        let mut visited = HashSet::from([origin]);
        let mut queue = VecDeque::from([(origin, 0u32)]);
        let mut reachable = Vec::new();

        while let Some((current, spent)) = queue.pop_front() {
            for next in current.neighbors() {
                if !dimensions.contains(next)
                    || visited.contains(&next)
                    || roster.is_blocked_for(next, unit.id)
                {
                    continue;
                }

                let cost = spent + unit.step_cost(terrain.profile(next));
                if cost > unit.movement {
                    continue;
                }

                visited.insert(next);
                queue.push_back((next, cost));
                reachable.push(ReachableCell {
                    position: next,
                    cost,
                });
            }
        }

        reachable
    }
}

/// Cost-ordered expansion (Dijkstra) bounded by the movement budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheapestReach;

impl ReachStrategy for CheapestReach {
    fn reachable(&self, unit: &Unit, terrain: &TerrainMap, roster: &Roster) -> Vec<ReachableCell> {
        let dimensions = terrain.dimensions();
        let origin = unit.position;

        let mut best: HashMap<Position, u32> = HashMap::from([(origin, 0)]);
        let mut settled = HashSet::new();
        // (cost, discovery sequence, cell); the sequence keeps ties deterministic
        let mut frontier = BinaryHeap::from([Reverse((0u32, 0u64, origin))]);
        let mut sequence = 0u64;
        let mut reachable = Vec::new();

        while let Some(Reverse((spent, _, current))) = frontier.pop() {
            if !settled.insert(current) {
                continue;
            }
            if current != origin {
                reachable.push(ReachableCell {
                    position: current,
                    cost: spent,
                });
            }

            for next in current.neighbors() {
                if !dimensions.contains(next)
                    || settled.contains(&next)
                    || roster.is_blocked_for(next, unit.id)
                {
                    continue;
                }

                let cost = spent + unit.step_cost(terrain.profile(next));
                if cost > unit.movement || best.get(&next).is_some_and(|&known| known <= cost) {
                    continue;
                }

                best.insert(next, cost);
                sequence += 1;
                frontier.push(Reverse((cost, sequence, next)));
            }
        }

        reachable
    }
}
