//! Enemy phase scheduling.
//!
//! Living enemies act one at a time in roster order. Each call to
//! [`Battle::advance_enemy`] processes exactly one unit, which gives hosts a
//! suspension point for pacing between units.

use crate::ai::{AiDecision, AiError, AiView};
use crate::error::GameError;
use crate::state::{Position, Side, Unit, UnitId};

use super::{Battle, BattleError, BattleEvent, BattlePhase, Engagement};

/// What one enemy unit did on its action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyAction {
    Attacked(Engagement),
    /// Relocated, then struck whatever fell into range from the new cell.
    Moved {
        from: Position,
        to: Position,
        engagement: Option<Engagement>,
    },
    Waited,
    /// The controller failed or returned an illegal decision; nothing happened.
    Skipped(AiError),
}

/// Result of [`Battle::advance_enemy`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStep {
    pub unit: UnitId,
    pub action: EnemyAction,
}

impl Battle {
    /// Processes the next enemy in the queue.
    ///
    /// Returns `None` when no living enemy was left to act. The phase passes
    /// back to the player (turn counter incremented) as soon as the last
    /// queued enemy has acted, unless the battle ended first.
    pub fn advance_enemy(&mut self) -> Result<Option<EnemyStep>, BattleError> {
        self.require_phase(BattlePhase::EnemyTurn)?;

        self.prune_enemy_queue();
        let Some(id) = self.enemy_queue.pop_front() else {
            self.finish_enemy_phase();
            return Ok(None);
        };

        let action = self.act_enemy(id);
        self.mark_acted(id);

        if self.phase == BattlePhase::EnemyTurn {
            self.prune_enemy_queue();
            if self.enemy_queue.is_empty() {
                self.finish_enemy_phase();
            }
        }
        Ok(Some(EnemyStep { unit: id, action }))
    }

    /// Runs the whole enemy phase without pausing.
    pub fn run_enemy_phase(&mut self) -> Result<Vec<EnemyStep>, BattleError> {
        self.require_phase(BattlePhase::EnemyTurn)?;
        let mut steps = Vec::new();
        while self.phase == BattlePhase::EnemyTurn {
            if let Some(step) = self.advance_enemy()? {
                steps.push(step);
            }
        }
        Ok(steps)
    }

    pub(super) fn begin_enemy_phase(&mut self) {
        self.enemy_queue.clear();
        for unit in self.roster.units_on_mut(Side::Enemy) {
            unit.has_acted = false;
        }
        self.enemy_queue
            .extend(self.roster.living_on(Side::Enemy).map(|unit| unit.id));
        self.set_phase(BattlePhase::EnemyTurn);
    }

    fn finish_enemy_phase(&mut self) {
        self.enemy_queue.clear();
        for unit in self.roster.units_on_mut(Side::Player) {
            unit.has_acted = false;
        }
        self.turn += 1;
        self.set_phase(BattlePhase::PlayerTurn);
    }

    /// Drops queued enemies that were defeated before their action.
    fn prune_enemy_queue(&mut self) {
        while let Some(&id) = self.enemy_queue.front() {
            if self.roster.get(id).is_some_and(Unit::is_alive) {
                break;
            }
            self.enemy_queue.pop_front();
        }
    }

    fn act_enemy(&mut self, id: UnitId) -> EnemyAction {
        let decision = {
            let view = AiView::new(id, &self.roster, &self.terrain, self.config.reach_mode);
            self.ai.decide(&view)
        };

        match decision.and_then(|decision| self.apply_decision(id, decision)) {
            Ok(action) => action,
            Err(error) => {
                tracing::warn!(
                    unit = %id,
                    code = error.error_code(),
                    %error,
                    "enemy action failed; skipping unit"
                );
                self.emit(BattleEvent::AiFailed {
                    unit: id,
                    error: error.clone(),
                });
                EnemyAction::Skipped(error)
            }
        }
    }

    /// Validates a decision against the board, then applies it.
    fn apply_decision(&mut self, id: UnitId, decision: AiDecision) -> Result<EnemyAction, AiError> {
        tracing::debug!(unit = %id, ?decision, "enemy decision");
        match decision {
            AiDecision::Attack { target } => {
                self.validate_target(id, target)?;
                let engagement = self.engage(id, target).map_err(|error| rejected(id, &error))?;
                self.check_outcome();
                Ok(EnemyAction::Attacked(engagement))
            }
            AiDecision::Move {
                destination,
                target,
            } => {
                self.validate_destination(id, destination)?;
                let from = self
                    .relocate(id, destination)
                    .ok_or(AiError::UnitNotFound(id))?;

                let engagement = match self.follow_up_target(id, target) {
                    Some(target) => {
                        let engagement = self.engage(id, target).map_err(|error| rejected(id, &error))?;
                        self.check_outcome();
                        Some(engagement)
                    }
                    None => None,
                };
                Ok(EnemyAction::Moved {
                    from,
                    to: destination,
                    engagement,
                })
            }
            AiDecision::Wait => {
                self.emit(BattleEvent::UnitWaited { unit: id });
                Ok(EnemyAction::Waited)
            }
        }
    }

    fn validate_target(&self, id: UnitId, target: UnitId) -> Result<(), AiError> {
        let unit = self.roster.get(id).ok_or(AiError::UnitNotFound(id))?;
        let Some(defender) = self.roster.get(target) else {
            return Err(invalid(id, format!("target {target} does not exist")));
        };
        if !defender.is_alive() || defender.side == unit.side {
            return Err(invalid(id, format!("target {target} is not a living opponent")));
        }
        if !unit.can_reach(defender.position) {
            return Err(invalid(id, format!("target {target} is out of range")));
        }
        Ok(())
    }

    fn validate_destination(&self, id: UnitId, destination: Position) -> Result<(), AiError> {
        let unit = self.roster.get(id).ok_or(AiError::UnitNotFound(id))?;
        if destination == unit.position {
            return Ok(());
        }
        let reachable = self
            .config
            .reach_mode
            .reachable(unit, &self.terrain, &self.roster);
        if reachable.iter().any(|cell| cell.position == destination) {
            Ok(())
        } else {
            Err(invalid(id, format!("destination {destination} is not reachable")))
        }
    }

    /// The decision's target when it is now in range, otherwise the first
    /// living opponent in range in roster order.
    fn follow_up_target(&self, id: UnitId, preferred: UnitId) -> Option<UnitId> {
        let unit = self.roster.get(id)?;
        let in_range = |other: &Unit| other.is_alive() && other.side != unit.side && unit.can_reach(other.position);

        self.roster
            .get(preferred)
            .filter(|target| in_range(target))
            .or_else(|| self.roster.iter().find(|other| in_range(other)))
            .map(|target| target.id)
    }
}

fn invalid(unit: UnitId, reason: String) -> AiError {
    AiError::InvalidDecision { unit, reason }
}

fn rejected(unit: UnitId, error: &BattleError) -> AiError {
    invalid(unit, error.to_string())
}
