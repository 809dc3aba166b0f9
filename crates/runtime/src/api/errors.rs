//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the battle worker, the player command provider and
//! the outcome sinks so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{AiError, BattleError, ErrorSeverity, GameError, SetupError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("battle setup rejected")]
    Setup(#[from] SetupError),

    #[error("player controller failed")]
    Controller(#[from] AiError),

    #[error("player command provider returned no commands during the player turn")]
    EmptyPlan,

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("battle still undecided after {limit} turns")]
    TurnLimit { limit: u32 },

    #[error("outcome sink failed: {0}")]
    Sink(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Battle(error) => error.severity(),
            Self::Setup(error) => error.severity(),
            Self::Controller(error) => error.severity(),
            Self::EmptyPlan | Self::TurnLimit { .. } => ErrorSeverity::Recoverable,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
            Self::Sink(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Battle(error) => error.error_code(),
            Self::Setup(error) => error.error_code(),
            Self::Controller(error) => error.error_code(),
            Self::EmptyPlan => "RUNTIME_EMPTY_PLAN",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::TurnLimit { .. } => "RUNTIME_TURN_LIMIT",
            Self::Sink(_) => "RUNTIME_SINK",
        }
    }
}
