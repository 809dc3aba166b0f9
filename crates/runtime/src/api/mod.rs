//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the session and worker modules can stay focused on orchestration.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod sinks;
pub mod types;

pub use errors::{Result, RuntimeError};
pub use handle::SessionHandle;
pub use providers::{AutoPlayer, CommandProvider, PassivePlayer};
pub use sinks::{CollectingSink, OutcomeSink};
pub use types::{EnemyTick, Observation};
