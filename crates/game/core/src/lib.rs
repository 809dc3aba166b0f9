//! Deterministic grid-tactics battle rules.
//!
//! `tactics-core` defines the canonical battle rules (terrain, movement,
//! combat, enemy AI and the turn/phase state machine) and exposes pure APIs
//! that presentation layers and offline tools reuse. All roster mutation flows
//! through [`engine::Battle`]; the planners and resolvers are read-only.
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod movement;
pub mod scenario;
pub mod state;

pub use ai::{AiDecision, AiError, AiView, ChaseAi, UnitAi};
pub use combat::{CombatForecast, StrikeForecast, StrikeOutcome, StrikeResult};
pub use config::BattleConfig;
pub use engine::{
    Battle, BattleBuilder, BattleCommand, BattleError, BattleEvent, BattleOutcome, BattlePhase,
    BattleReport, BattleSnapshot, EnemyAction, EnemyStep, Engagement, PendingMove, Selection,
    SetupError, SurvivorRecord, UnitActionState,
};
pub use env::{
    FixedRollRng, PcgRng, RngOracle, TerrainKind, TerrainMap, TerrainProfile, TerrainTile,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use movement::{
    ReachMode, ReachStrategy, ReachableCell, attack_cells, find_path, move_range, path_cost,
};
pub use scenario::{Scenario, TerrainSpec};
pub use state::{
    AttackRange, Facing, GridDimensions, Position, Roster, Side, Unit, UnitCapabilities, UnitId,
};
