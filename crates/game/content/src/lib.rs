//! Data-driven battle content and loaders.
//!
//! This crate is the scenario supplier for `tactics-core`:
//! - Built-in scenarios (always available, no data files needed)
//! - Battle scenarios (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Loaders map the file formats onto tactics-core types and validate the
//! result before handing it out; nothing here is retained by a battle.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{BUILTIN_SCENARIOS, builtin_scenario};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ScenarioLoader};
