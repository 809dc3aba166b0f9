//! Read-only views handed to presentation and progression layers.

use crate::combat::CombatForecast;
use crate::movement::ReachableCell;
use crate::state::{Position, Unit, UnitId};

use super::phase::{BattleOutcome, BattlePhase};
use super::selection::Selection;

/// Everything a renderer needs after a state change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub phase: BattlePhase,
    pub turn: u32,
    pub units: Vec<Unit>,
    pub selected: Option<UnitId>,
    pub reachable: Vec<ReachableCell>,
    pub attack_cells: Vec<Position>,
    pub preview: Option<CombatForecast>,
}

impl BattleSnapshot {
    pub(crate) fn capture(phase: BattlePhase, turn: u32, units: Vec<Unit>, selection: &Selection) -> Self {
        Self {
            phase,
            turn,
            units,
            selected: selection.unit(),
            reachable: selection.reachable().to_vec(),
            attack_cells: selection.attack_cells().to_vec(),
            preview: selection.preview().cloned(),
        }
    }
}

/// Final state of a surviving player unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurvivorRecord {
    pub id: UnitId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
}

impl From<&Unit> for SurvivorRecord {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            hp: unit.hp,
            max_hp: unit.max_hp,
        }
    }
}

/// Outcome handed to the progression system once a battle ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub scenario: String,
    pub outcome: BattleOutcome,
    /// Turn counter at the moment the battle ended.
    pub turns: u32,
    /// Living player units in roster order. Empty on defeat.
    pub survivors: Vec<SurvivorRecord>,
}
