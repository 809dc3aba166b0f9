//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`BattleError`, `SetupError`, `AiError`) live next
//! to the operations that raise them. This module only carries the shared
//! classification used by hosts to decide how to react.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was legal in shape but not right now (wrong phase, unit
    /// already acted). Retrying after the state changes may succeed.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: coordinates off the grid, unknown unit id.
    Validation,

    /// Unexpected inconsistency between engine components.
    Internal,

    /// The battle cannot be constructed or continued.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// Implementors derive `thiserror::Error` for the display side and classify
/// each variant here.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    ///
    /// Useful for log filtering and for asserting on failures in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
