//! Strike outcomes.

use crate::state::UnitId;

use super::forecast::StrikeForecast;
use super::hit::check_hit;

/// Outcome of a single strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeOutcome {
    Miss,
    Hit { damage: u32 },
}

impl StrikeOutcome {
    pub fn damage(self) -> u32 {
        match self {
            StrikeOutcome::Miss => 0,
            StrikeOutcome::Hit { damage } => damage,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, StrikeOutcome::Hit { .. })
    }
}

/// A resolved strike with the roll that decided it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeResult {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub hit_rate: u32,
    pub roll: u32,
    pub backstab: bool,
    pub outcome: StrikeOutcome,
    /// Defender hit points after the strike.
    pub remaining_hp: u32,
}

impl StrikeResult {
    pub fn defeated_defender(&self) -> bool {
        self.remaining_hp == 0
    }
}

/// Applies a d100 roll to a forecast strike. Single-shot; a miss is final.
pub fn resolve_strike(strike: &StrikeForecast, roll: u32) -> StrikeOutcome {
    if check_hit(strike.hit_rate, roll) {
        StrikeOutcome::Hit {
            damage: strike.damage,
        }
    } else {
        StrikeOutcome::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_above_rate_misses() {
        let strike = StrikeForecast {
            damage: 12,
            hit_rate: 75,
            backstab: false,
            lethal: false,
        };
        assert_eq!(resolve_strike(&strike, 75), StrikeOutcome::Hit { damage: 12 });
        assert_eq!(resolve_strike(&strike, 76), StrikeOutcome::Miss);
        assert_eq!(resolve_strike(&strike, 76).damage(), 0);
    }
}
