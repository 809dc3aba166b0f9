use crate::ai::AiError;
use crate::combat::{CombatForecast, StrikeResult};
use crate::state::{Position, Side, UnitId};

use super::phase::BattlePhase;

/// Discrete, log-worthy things that happened during a battle.
///
/// Buffered by [`super::Battle`] in emission order until the host drains them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum BattleEvent {
    PhaseChanged {
        phase: BattlePhase,
        turn: u32,
    },
    UnitSelected {
        unit: UnitId,
        reachable: usize,
    },
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    MoveCancelled {
        unit: UnitId,
        position: Position,
    },
    AttackPreviewed {
        forecast: CombatForecast,
    },
    /// The initiating strike of an engagement, hit or miss.
    Attacked {
        strike: StrikeResult,
    },
    Countered {
        strike: StrikeResult,
    },
    UnitDefeated {
        unit: UnitId,
        side: Side,
    },
    UnitWaited {
        unit: UnitId,
    },
    /// An enemy controller failed; the unit skipped its action.
    AiFailed {
        unit: UnitId,
        error: AiError,
    },
    Victory {
        turn: u32,
    },
    Defeat {
        turn: u32,
    },
}

impl BattleEvent {
    /// Short identifier for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            BattleEvent::PhaseChanged { .. } => "phase_changed",
            BattleEvent::UnitSelected { .. } => "unit_selected",
            BattleEvent::UnitMoved { .. } => "unit_moved",
            BattleEvent::MoveCancelled { .. } => "move_cancelled",
            BattleEvent::AttackPreviewed { .. } => "attack_previewed",
            BattleEvent::Attacked { .. } => "attacked",
            BattleEvent::Countered { .. } => "countered",
            BattleEvent::UnitDefeated { .. } => "unit_defeated",
            BattleEvent::UnitWaited { .. } => "unit_waited",
            BattleEvent::AiFailed { .. } => "ai_failed",
            BattleEvent::Victory { .. } => "victory",
            BattleEvent::Defeat { .. } => "defeat",
        }
    }
}
