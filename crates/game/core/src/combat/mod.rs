//! Combat resolution system.
//!
//! Pure, stateless functions computing strike outcomes from two units, the
//! terrain under the defender and the relative facing. Nothing here mutates
//! the roster; the orchestrator applies results.
//!
//! # Core Functions
//!
//! - `calculate_damage`: attack vs defense with backstab/counter multipliers
//! - `calculate_hit_rate`: skill vs skill/evasion with terrain evasion
//! - `is_backstab`: attack direction vs defender facing
//! - `forecast`: preview of a full exchange (strike plus potential counter)
//! - `resolve_strike`: applies a d100 roll to a forecast strike

pub mod damage;
pub mod facing;
pub mod forecast;
pub mod hit;
pub mod result;

pub use damage::{calculate_damage, scale_damage};
pub use facing::{attack_side, is_backstab};
pub use forecast::{CombatForecast, StrikeForecast, can_counter, forecast};
pub use hit::{calculate_hit_rate, check_hit};
pub use result::{StrikeOutcome, StrikeResult, resolve_strike};
