//! Battle roster representation.
//!
//! This module owns the data structures that describe units, grid
//! coordinates and sides. Planners and the AI query this state read-only;
//! only the [`crate::engine::Battle`] orchestrator mutates it.
pub mod common;
pub mod roster;
pub mod unit;

pub use common::{Facing, GridDimensions, Position, Side, UnitId};
pub use roster::Roster;
pub use unit::{AttackRange, Unit, UnitCapabilities};
