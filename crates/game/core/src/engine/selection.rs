use crate::combat::CombatForecast;
use crate::movement::ReachableCell;
use crate::state::{Facing, Position, UnitId};

/// A move that has been made but not yet committed by an action.
///
/// Keeps what `cancel_move` needs to put the unit back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingMove {
    pub unit: UnitId,
    pub origin: Position,
    pub origin_facing: Facing,
}

/// Transient player-side selection owned by the orchestrator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum Selection {
    #[default]
    Idle,
    MoveRange {
        unit: UnitId,
        reachable: Vec<ReachableCell>,
    },
    Moved {
        pending: PendingMove,
        attack_cells: Vec<Position>,
    },
    AttackRange {
        pending: PendingMove,
        attack_cells: Vec<Position>,
        /// Living enemies inside the annulus, roster order.
        targets: Vec<UnitId>,
    },
    Preview {
        pending: PendingMove,
        attack_cells: Vec<Position>,
        targets: Vec<UnitId>,
        forecast: CombatForecast,
    },
}

impl Selection {
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Selection::Idle => None,
            Selection::MoveRange { unit, .. } => Some(*unit),
            Selection::Moved { pending, .. }
            | Selection::AttackRange { pending, .. }
            | Selection::Preview { pending, .. } => Some(pending.unit),
        }
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        match self {
            Selection::Moved { pending, .. }
            | Selection::AttackRange { pending, .. }
            | Selection::Preview { pending, .. } => Some(pending),
            Selection::Idle | Selection::MoveRange { .. } => None,
        }
    }

    pub fn reachable(&self) -> &[ReachableCell] {
        match self {
            Selection::MoveRange { reachable, .. } => reachable,
            _ => &[],
        }
    }

    pub fn attack_cells(&self) -> &[Position] {
        match self {
            Selection::Moved { attack_cells, .. }
            | Selection::AttackRange { attack_cells, .. }
            | Selection::Preview { attack_cells, .. } => attack_cells,
            Selection::Idle | Selection::MoveRange { .. } => &[],
        }
    }

    pub fn preview(&self) -> Option<&CombatForecast> {
        match self {
            Selection::Preview { forecast, .. } => Some(forecast),
            _ => None,
        }
    }

    pub fn state(&self) -> UnitActionState {
        match self {
            Selection::Idle => UnitActionState::Unselected,
            Selection::MoveRange { .. } => UnitActionState::MoveRangeShown,
            Selection::Moved { .. } => UnitActionState::MovedAwaitingAction,
            Selection::AttackRange { .. } | Selection::Preview { .. } => {
                UnitActionState::AttackRangeShown
            }
        }
    }
}

/// Per-unit view of the selection flow.
///
/// `Unselected -> MoveRangeShown -> MovedAwaitingAction -> AttackRangeShown`,
/// collapsing to `Resolved` once the unit has acted this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitActionState {
    Unselected,
    MoveRangeShown,
    MovedAwaitingAction,
    AttackRangeShown,
    Resolved,
}
