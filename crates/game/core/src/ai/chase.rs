use crate::movement::attack_cells;

use super::{AiDecision, AiError, AiView, UnitAi};

/// Reactive "close in and strike" policy.
///
/// 1. No living opponents: wait.
/// 2. Target the nearest living opponent by Manhattan distance (first in
///    roster order on ties).
/// 3. Target inside the attack annulus: attack it.
/// 4. Otherwise move to the reachable cell closest to the target (first in
///    enumeration order on ties); wait if nothing is reachable.
///
/// The move choice is greedy on straight-line distance and does not look at
/// the path beyond this turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChaseAi;

impl UnitAi for ChaseAi {
    fn decide(&self, view: &AiView<'_>) -> Result<AiDecision, AiError> {
        let unit = view.actor()?;

        let Some(target) = view
            .roster
            .living_on(unit.side.opposite())
            .min_by_key(|opponent| unit.position.manhattan(opponent.position))
        else {
            return Ok(AiDecision::Wait);
        };

        let annulus = attack_cells(unit.position, unit.attack_range, view.terrain.dimensions());
        if annulus.contains(&target.position) {
            tracing::debug!(unit = %unit.id, target = %target.id, "target in range");
            return Ok(AiDecision::Attack { target: target.id });
        }

        let reachable = view.reach_mode.reachable(unit, view.terrain, view.roster);
        let Some(best) = reachable
            .iter()
            .min_by_key(|cell| cell.position.manhattan(target.position))
        else {
            tracing::debug!(unit = %unit.id, "no reachable cells");
            return Ok(AiDecision::Wait);
        };

        tracing::debug!(
            unit = %unit.id,
            target = %target.id,
            destination = %best.position,
            "closing distance"
        );
        Ok(AiDecision::Move {
            destination: best.position,
            target: target.id,
        })
    }
}
