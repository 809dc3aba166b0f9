//! Enemy unit decision-making.
//!
//! The orchestrator asks a [`UnitAi`] for exactly one decision per unit per
//! phase. Implementations are read-only over the board; the orchestrator
//! validates and applies whatever they return. A failing decision only
//! skips that unit's action, it never aborts the phase.

mod chase;

pub use chase::ChaseAi;

use crate::env::TerrainMap;
use crate::error::{ErrorSeverity, GameError};
use crate::movement::ReachMode;
use crate::state::{Position, Roster, Unit, UnitId};

/// One action chosen for a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiDecision {
    /// Strike `target` from the current cell.
    Attack { target: UnitId },
    /// Relocate towards `target`; the orchestrator re-checks attack range afterwards.
    Move { destination: Position, target: UnitId },
    Wait,
}

/// Errors raised while a controller evaluates a unit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiError {
    #[error("unit {0} not found on the roster")]
    UnitNotFound(UnitId),

    #[error("unit {0} is defeated")]
    UnitDefeated(UnitId),

    #[error("decision for unit {unit} rejected: {reason}")]
    InvalidDecision { unit: UnitId, reason: String },

    #[error("controller failure: {0}")]
    Controller(String),
}

impl GameError for AiError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AiError::UnitNotFound(_) | AiError::UnitDefeated(_) => ErrorSeverity::Internal,
            AiError::InvalidDecision { .. } | AiError::Controller(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AiError::UnitNotFound(_) => "AI_UNIT_NOT_FOUND",
            AiError::UnitDefeated(_) => "AI_UNIT_DEFEATED",
            AiError::InvalidDecision { .. } => "AI_INVALID_DECISION",
            AiError::Controller(_) => "AI_CONTROLLER_FAILURE",
        }
    }
}

/// Read-only board view handed to a controller.
#[derive(Clone, Copy)]
pub struct AiView<'a> {
    pub unit: UnitId,
    pub roster: &'a Roster,
    pub terrain: &'a TerrainMap,
    pub reach_mode: ReachMode,
}

impl<'a> AiView<'a> {
    pub fn new(unit: UnitId, roster: &'a Roster, terrain: &'a TerrainMap, reach_mode: ReachMode) -> Self {
        Self {
            unit,
            roster,
            terrain,
            reach_mode,
        }
    }

    /// The acting unit, provided it is on the roster and alive.
    pub fn actor(&self) -> Result<&'a Unit, AiError> {
        let unit = self
            .roster
            .get(self.unit)
            .ok_or(AiError::UnitNotFound(self.unit))?;
        if !unit.is_alive() {
            return Err(AiError::UnitDefeated(self.unit));
        }
        Ok(unit)
    }
}

/// Policy that picks an action for one unit.
pub trait UnitAi: Send + Sync {
    fn decide(&self, view: &AiView<'_>) -> Result<AiDecision, AiError>;
}
