//! Read-only views returned by the battle worker.

use tactics_core::{BattleConfig, BattlePhase, BattleReport, BattleSnapshot, EnemyStep, TerrainMap};

/// Everything a player controller needs to plan its next commands.
#[derive(Debug, Clone)]
pub struct Observation {
    pub scenario: String,
    pub snapshot: BattleSnapshot,
    pub terrain: TerrainMap,
    pub config: BattleConfig,
    /// Present once the battle has ended.
    pub report: Option<BattleReport>,
}

impl Observation {
    pub fn phase(&self) -> BattlePhase {
        self.snapshot.phase
    }
}

/// Result of advancing the enemy phase by one unit.
#[derive(Debug, Clone)]
pub struct EnemyTick {
    /// `None` when no living enemy was left to act.
    pub step: Option<EnemyStep>,
    /// Phase after the step; leaves `EnemyTurn` once the queue drains.
    pub phase: BattlePhase,
}
