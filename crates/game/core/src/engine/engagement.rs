use crate::combat::{CombatForecast, StrikeForecast, StrikeResult, forecast, resolve_strike};
use crate::env::compute_seed;
use crate::state::{Facing, UnitId};

use super::{Battle, BattleError, BattleEvent};

/// Roll context for the initiating strike.
const STRIKE_CONTEXT: u32 = 0;
/// Roll context for the counter-attack.
const COUNTER_CONTEXT: u32 = 1;

/// A fully resolved attack: the preview it was based on, the strike and the
/// counter (when the defender survived with the attacker in range).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Engagement {
    pub forecast: CombatForecast,
    pub strike: StrikeResult,
    pub counter: Option<StrikeResult>,
}

impl Engagement {
    pub fn defender_defeated(&self) -> bool {
        self.strike.defeated_defender()
    }

    pub fn attacker_defeated(&self) -> bool {
        self.counter
            .as_ref()
            .is_some_and(StrikeResult::defeated_defender)
    }
}

impl Battle {
    /// Runs one attack to completion: the attacker turns to its target, the
    /// strike is rolled and applied, then the counter if the defender is still
    /// standing and has the attacker in range.
    ///
    /// Does not run the win/loss check; callers do that once afterwards.
    pub(super) fn engage(
        &mut self,
        attacker_id: UnitId,
        defender_id: UnitId,
    ) -> Result<Engagement, BattleError> {
        let attacker = self
            .roster
            .get(attacker_id)
            .ok_or(BattleError::UnitNotFound(attacker_id))?;
        let defender = self
            .roster
            .get(defender_id)
            .ok_or(BattleError::UnitNotFound(defender_id))?;
        if !attacker.is_alive() {
            return Err(BattleError::UnitDefeated(attacker_id));
        }
        if !defender.is_alive() {
            return Err(BattleError::UnitDefeated(defender_id));
        }

        let mut attacker = attacker.clone();
        let defender = defender.clone();
        attacker.facing = Facing::toward(attacker.position, defender.position);
        let preview = forecast(&attacker, &defender, &self.terrain);

        if let Some(unit) = self.roster.get_mut(attacker_id) {
            unit.facing = attacker.facing;
        }

        let nonce = self.engagements;
        let strike = self.roll_strike(&preview.strike, attacker_id, defender_id, nonce, STRIKE_CONTEXT);
        tracing::debug!(
            attacker = %attacker_id,
            defender = %defender_id,
            roll = strike.roll,
            hit_rate = strike.hit_rate,
            backstab = strike.backstab,
            damage = strike.outcome.damage(),
            "strike resolved"
        );
        self.emit(BattleEvent::Attacked { strike });
        self.announce_defeat(&strike);

        let counter = match preview.counter {
            Some(counter) if !strike.defeated_defender() => {
                let result = self.roll_strike(&counter, defender_id, attacker_id, nonce, COUNTER_CONTEXT);
                tracing::debug!(
                    attacker = %defender_id,
                    defender = %attacker_id,
                    roll = result.roll,
                    damage = result.outcome.damage(),
                    "counter resolved"
                );
                self.emit(BattleEvent::Countered { strike: result });
                self.announce_defeat(&result);
                Some(result)
            }
            _ => None,
        };

        self.engagements += 1;
        Ok(Engagement {
            forecast: preview,
            strike,
            counter,
        })
    }

    fn roll_strike(
        &mut self,
        strike: &StrikeForecast,
        attacker: UnitId,
        defender: UnitId,
        nonce: u64,
        context: u32,
    ) -> StrikeResult {
        let seed = compute_seed(self.config.roll_seed, nonce, attacker.0, context);
        let roll = self.rng.roll_d100(seed);
        let outcome = resolve_strike(strike, roll);
        let remaining_hp = self
            .roster
            .get_mut(defender)
            .map_or(0, |unit| unit.take_damage(outcome.damage()));

        StrikeResult {
            attacker,
            defender,
            hit_rate: strike.hit_rate,
            roll,
            backstab: strike.backstab,
            outcome,
            remaining_hp,
        }
    }

    fn announce_defeat(&mut self, strike: &StrikeResult) {
        if !strike.defeated_defender() {
            return;
        }
        if let Some(side) = self.roster.get(strike.defender).map(|unit| unit.side) {
            tracing::info!(unit = %strike.defender, %side, "unit defeated");
            self.emit(BattleEvent::UnitDefeated {
                unit: strike.defender,
                side,
            });
        }
    }
}
