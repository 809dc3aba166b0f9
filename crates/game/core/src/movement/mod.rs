//! Movement planning.
//!
//! - [`reach`] computes the budgeted set of cells a unit may end its move on
//! - [`path`] finds the cheapest concrete route between two cells (A*)
//! - [`range`] enumerates attack annuli
//!
//! All functions are read-only over the roster and terrain.

pub mod path;
pub mod range;
pub mod reach;

pub use path::{find_path, path_cost};
pub use range::attack_cells;
pub use reach::{CheapestReach, FifoReach, ReachMode, ReachStrategy, ReachableCell, move_range};
