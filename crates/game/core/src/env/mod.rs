//! Static battle environment: terrain and randomness.
//!
//! Nothing here changes once a battle starts. Terrain is generated (or
//! loaded) once per battle and randomness is injected through
//! [`RngOracle`] so every roll is reproducible from a seed.
pub mod rng;
pub mod terrain;

pub use rng::{FixedRollRng, PcgRng, RngOracle, compute_seed};
pub use terrain::{TerrainKind, TerrainMap, TerrainProfile, TerrainTile};
