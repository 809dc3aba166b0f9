//! Error types for battle setup and orchestration.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, Side, UnitId};

use super::phase::BattlePhase;

/// Rejected player-side or enemy-side request.
///
/// Every variant is raised before any state is touched, so a failed call
/// leaves the battle exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("operation requires phase {expected}, battle is in {actual}")]
    WrongPhase {
        expected: BattlePhase,
        actual: BattlePhase,
    },

    #[error("unit {0} not found on the roster")]
    UnitNotFound(UnitId),

    #[error("unit {0} is not a player unit")]
    NotPlayerUnit(UnitId),

    #[error("unit {0} is defeated")]
    UnitDefeated(UnitId),

    #[error("unit {0} has already acted this turn")]
    AlreadyActed(UnitId),

    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("{operation} is not available in the current selection state")]
    InvalidSelection { operation: &'static str },

    #[error("unit {unit} cannot reach {destination}")]
    Unreachable { unit: UnitId, destination: Position },

    #[error("unit {0} is not a valid attack target")]
    InvalidTarget(UnitId),

    #[error("unit {0} is outside the attack range")]
    TargetOutOfRange(UnitId),

    #[error("no attack preview to confirm")]
    NoPendingPreview,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BattleError::WrongPhase { .. }
            | BattleError::InvalidSelection { .. }
            | BattleError::NoPendingPreview => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BattleError::WrongPhase { .. } => "BATTLE_WRONG_PHASE",
            BattleError::UnitNotFound(_) => "BATTLE_UNIT_NOT_FOUND",
            BattleError::NotPlayerUnit(_) => "BATTLE_NOT_PLAYER_UNIT",
            BattleError::UnitDefeated(_) => "BATTLE_UNIT_DEFEATED",
            BattleError::AlreadyActed(_) => "BATTLE_ALREADY_ACTED",
            BattleError::OutOfBounds(_) => "BATTLE_OUT_OF_BOUNDS",
            BattleError::InvalidSelection { .. } => "BATTLE_INVALID_SELECTION",
            BattleError::Unreachable { .. } => "BATTLE_UNREACHABLE",
            BattleError::InvalidTarget(_) => "BATTLE_INVALID_TARGET",
            BattleError::TargetOutOfRange(_) => "BATTLE_TARGET_OUT_OF_RANGE",
            BattleError::NoPendingPreview => "BATTLE_NO_PENDING_PREVIEW",
        }
    }
}

/// Scenario data that cannot start a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid of {rows}x{cols} exceeds the {max}x{max} limit")]
    GridTooLarge { rows: u32, cols: u32, max: u32 },

    #[error("roster is empty")]
    EmptyRoster,

    #[error("no living {0} units")]
    MissingSide(Side),

    #[error("unit id {0} appears more than once")]
    DuplicateUnit(UnitId),

    #[error("unit {unit} starts outside the grid at {position}")]
    OutOfBounds { unit: UnitId, position: Position },

    #[error("units {first} and {second} both start at {position}")]
    Overlap {
        first: UnitId,
        second: UnitId,
        position: Position,
    },

    #[error("unit {unit} has invalid stats: {reason}")]
    InvalidStats { unit: UnitId, reason: &'static str },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::EmptyGrid => "SETUP_EMPTY_GRID",
            SetupError::GridTooLarge { .. } => "SETUP_GRID_TOO_LARGE",
            SetupError::EmptyRoster => "SETUP_EMPTY_ROSTER",
            SetupError::MissingSide(_) => "SETUP_MISSING_SIDE",
            SetupError::DuplicateUnit(_) => "SETUP_DUPLICATE_UNIT",
            SetupError::OutOfBounds { .. } => "SETUP_OUT_OF_BOUNDS",
            SetupError::Overlap { .. } => "SETUP_OVERLAP",
            SetupError::InvalidStats { .. } => "SETUP_INVALID_STATS",
        }
    }
}
