use crate::movement::ReachMode;

/// Battle configuration and tunable parameters.
///
/// Grid dimensions and terrain seeds are scenario data; this struct only
/// carries rules switches that apply to every battle a host starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Reachability algorithm used by the orchestrator and the enemy AI.
    pub reach_mode: ReachMode,
    /// Hand the phase to the enemy as soon as every living player unit acted.
    pub auto_end_turn: bool,
    /// Base seed for hit rolls. Identical seeds replay identical battles.
    pub roll_seed: u64,
}

impl BattleConfig {
    // ===== combat constants =====
    pub const BASE_HIT_RATE: i32 = 90;
    pub const BACKSTAB_HIT_BONUS: i32 = 30;
    pub const MIN_HIT_RATE: i32 = 10;
    pub const MAX_HIT_RATE: i32 = 100;
    /// Backstab damage multiplier as (numerator, denominator): 1.5x.
    pub const BACKSTAB_DAMAGE: (i64, i64) = (3, 2);
    /// Counter-attack damage multiplier as (numerator, denominator): 0.8x.
    pub const COUNTER_DAMAGE: (i64, i64) = (4, 5);
    pub const MIN_DAMAGE: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROLL_SEED: u64 = 0x5eed_0f_ba77_1e;

    pub fn new() -> Self {
        Self {
            reach_mode: ReachMode::default(),
            auto_end_turn: true,
            roll_seed: Self::DEFAULT_ROLL_SEED,
        }
    }

    pub fn with_roll_seed(roll_seed: u64) -> Self {
        Self {
            roll_seed,
            ..Self::new()
        }
    }

    pub fn reach_mode(mut self, reach_mode: ReachMode) -> Self {
        self.reach_mode = reach_mode;
        self
    }

    pub fn auto_end_turn(mut self, enabled: bool) -> Self {
        self.auto_end_turn = enabled;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
