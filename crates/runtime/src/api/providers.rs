//! Asynchronous abstraction for sourcing player commands.
//!
//! A session plugs in a [`CommandProvider`] so the battle can run with human
//! input, scripted fixtures, or an AI policy driving the player side.
use async_trait::async_trait;
use tactics_core::{
    AiDecision, AiView, BattleCommand, ChaseAi, Roster, Side, UnitAi, UnitId, attack_cells,
};
use tracing::debug;

use super::errors::Result;
use super::types::Observation;

/// Trait for planning player commands from a read-only observation.
///
/// Each call plans the commands for one unit (or a single `EndTurn`). The
/// session applies them in order and asks again while the player phase
/// lasts, so a plan never needs to look past its own unit.
#[async_trait]
pub trait CommandProvider: Send + Sync {
    async fn plan(&self, observation: &Observation) -> Result<Vec<BattleCommand>>;
}

/// Ends every player turn without acting. Useful for testing.
pub struct PassivePlayer;

#[async_trait]
impl CommandProvider for PassivePlayer {
    async fn plan(&self, _observation: &Observation) -> Result<Vec<BattleCommand>> {
        Ok(vec![BattleCommand::EndTurn])
    }
}

/// Drives player units with a [`UnitAi`] policy, one unit per plan.
///
/// Units act in roster order. The policy's target is attacked when it is in
/// range after the move; otherwise the first enemy in range is, otherwise
/// the unit waits.
pub struct AutoPlayer {
    ai: Box<dyn UnitAi>,
}

impl AutoPlayer {
    pub fn new(ai: impl UnitAi + 'static) -> Self {
        Self { ai: Box::new(ai) }
    }
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(ChaseAi)
    }
}

#[async_trait]
impl CommandProvider for AutoPlayer {
    async fn plan(&self, observation: &Observation) -> Result<Vec<BattleCommand>> {
        let roster = Roster::new(observation.snapshot.units.clone());
        let Some(unit) = roster
            .living_on(Side::Player)
            .find(|unit| !unit.has_acted)
        else {
            return Ok(vec![BattleCommand::EndTurn]);
        };

        let view = AiView::new(
            unit.id,
            &roster,
            &observation.terrain,
            observation.config.reach_mode,
        );
        let decision = self.ai.decide(&view)?;
        debug!(unit = %unit.id, ?decision, "auto player decision");

        let (destination, preferred) = match decision {
            AiDecision::Attack { target } => (unit.position, Some(target)),
            AiDecision::Move {
                destination,
                target,
            } => (destination, Some(target)),
            AiDecision::Wait => {
                return Ok(vec![
                    BattleCommand::Select { unit: unit.id },
                    BattleCommand::Wait,
                ]);
            }
        };

        let in_range: Vec<UnitId> = attack_cells(
            destination,
            unit.attack_range,
            observation.terrain.dimensions(),
        )
        .into_iter()
        .filter_map(|cell| roster.occupant_at(cell))
        .filter(|occupant| occupant.side == Side::Enemy)
        .map(|occupant| occupant.id)
        .collect();
        let target = preferred
            .filter(|target| in_range.contains(target))
            .or_else(|| {
                roster
                    .living_on(Side::Enemy)
                    .map(|enemy| enemy.id)
                    .find(|id| in_range.contains(id))
            });

        let mut commands = vec![
            BattleCommand::Select { unit: unit.id },
            BattleCommand::Move { destination },
        ];
        match target {
            Some(target) => commands.extend([
                BattleCommand::ShowAttackRange,
                BattleCommand::ChooseTarget { target },
                BattleCommand::ConfirmAttack,
            ]),
            None => commands.push(BattleCommand::Wait),
        }
        Ok(commands)
    }
}
