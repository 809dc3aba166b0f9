//! Async session layer for tactics battles.
//!
//! This crate wires a [`tactics_core::Battle`] into a background worker,
//! a topic-based event bus and an injectable pacing strategy. Consumers
//! embed [`Session`] to play a battle to completion, subscribe to events
//! for rendering, and hand the final report to progression through
//! [`OutcomeSink`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`pacing`] holds the delay strategies applied between enemy steps
//! - `workers` keeps the battle task internal to the crate
pub mod api;
pub mod events;
pub mod pacing;
pub mod session;

mod workers;

pub use api::{
    AutoPlayer, CollectingSink, CommandProvider, EnemyTick, Observation, OutcomeSink,
    PassivePlayer, Result, RuntimeError, SessionHandle,
};
pub use events::{Event, EventBus, Topic};
pub use pacing::{FixedDelay, NoPacing, Pacer};
pub use session::{Session, SessionBuilder, SessionConfig};
