use crate::state::{Position, UnitId};

use super::{Battle, BattleError};

/// A single orchestrator request as data.
///
/// Hosts that script or replay battles drive them through [`Battle::apply`]
/// instead of calling the individual operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "command", rename_all = "snake_case"))]
pub enum BattleCommand {
    Start,
    Select { unit: UnitId },
    Deselect,
    Move { destination: Position },
    CancelMove,
    ShowAttackRange,
    ChooseTarget { target: UnitId },
    CancelAttack,
    ConfirmAttack,
    Wait,
    EndTurn,
    AdvanceEnemy,
}

impl Battle {
    /// Dispatches `command` to the matching operation; results beyond success
    /// are reported through the event buffer.
    pub fn apply(&mut self, command: BattleCommand) -> Result<(), BattleError> {
        tracing::trace!(?command, "applying command");
        match command {
            BattleCommand::Start => self.start(),
            BattleCommand::Select { unit } => self.select_unit(unit).map(drop),
            BattleCommand::Deselect => self.deselect(),
            BattleCommand::Move { destination } => self.move_selected(destination).map(drop),
            BattleCommand::CancelMove => self.cancel_move().map(drop),
            BattleCommand::ShowAttackRange => self.show_attack_range().map(drop),
            BattleCommand::ChooseTarget { target } => self.choose_target(target).map(drop),
            BattleCommand::CancelAttack => self.cancel_attack(),
            BattleCommand::ConfirmAttack => self.confirm_attack().map(drop),
            BattleCommand::Wait => self.wait_selected(),
            BattleCommand::EndTurn => self.end_turn(),
            BattleCommand::AdvanceEnemy => self.advance_enemy().map(drop),
        }
    }
}
