//! Topic-based event streaming for presentation and progression layers.
//!
//! The battle worker publishes every [`tactics_core::BattleEvent`] it drains,
//! a fresh [`tactics_core::BattleSnapshot`] after each state change and the
//! final [`tactics_core::BattleReport`] once. Consumers subscribe to the
//! topics they care about.

mod bus;

pub use bus::{Event, EventBus, Topic};
