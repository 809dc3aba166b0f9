//! Player-side selection flow.
//!
//! select -> move (or stay) -> attack range -> target preview -> confirm,
//! with `wait_selected` and the cancel operations as exits along the way.

use crate::combat::{CombatForecast, forecast};
use crate::movement::{ReachableCell, attack_cells};
use crate::state::{Position, Side, Unit, UnitId};

use super::{Battle, BattleError, BattleEvent, BattlePhase, Engagement, PendingMove, Selection};

impl Battle {
    /// Selects a ready player unit and exposes its move range.
    ///
    /// Switching from one unit's move range to another is allowed; a unit that
    /// already moved must act, wait or cancel first.
    pub fn select_unit(&mut self, id: UnitId) -> Result<Vec<ReachableCell>, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        if self.selection.pending().is_some() {
            return Err(BattleError::InvalidSelection {
                operation: "select_unit",
            });
        }

        let unit = self.ready_player_unit(id)?;
        let reachable = self.config.reach_mode.reachable(unit, &self.terrain, &self.roster);

        tracing::debug!(unit = %id, cells = reachable.len(), "unit selected");
        self.emit(BattleEvent::UnitSelected {
            unit: id,
            reachable: reachable.len(),
        });
        self.selection = Selection::MoveRange {
            unit: id,
            reachable: reachable.clone(),
        };
        Ok(reachable)
    }

    /// Drops a move-range selection.
    pub fn deselect(&mut self) -> Result<(), BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        match self.selection {
            Selection::Idle | Selection::MoveRange { .. } => {
                self.selection = Selection::Idle;
                Ok(())
            }
            _ => Err(BattleError::InvalidSelection {
                operation: "deselect",
            }),
        }
    }

    /// Moves the selected unit and returns its attack cells from the new cell.
    ///
    /// `destination` must be in the exposed move range, or the unit's own cell
    /// to act without moving.
    pub fn move_selected(&mut self, destination: Position) -> Result<Vec<Position>, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        let Selection::MoveRange { unit: id, reachable } = &self.selection else {
            return Err(BattleError::InvalidSelection {
                operation: "move_selected",
            });
        };
        let id = *id;
        if !self.terrain.dimensions().contains(destination) {
            return Err(BattleError::OutOfBounds(destination));
        }
        let unit = self.roster.get(id).ok_or(BattleError::UnitNotFound(id))?;
        if destination != unit.position && !reachable.iter().any(|cell| cell.position == destination) {
            return Err(BattleError::Unreachable {
                unit: id,
                destination,
            });
        }

        let pending = PendingMove {
            unit: id,
            origin: unit.position,
            origin_facing: unit.facing,
        };
        let cells = attack_cells(destination, unit.attack_range, self.terrain.dimensions());

        self.relocate(id, destination);
        self.selection = Selection::Moved {
            pending,
            attack_cells: cells.clone(),
        };
        Ok(cells)
    }

    /// Puts the unit back where it started and re-opens its move range.
    pub fn cancel_move(&mut self) -> Result<Vec<ReachableCell>, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        let pending = match &self.selection {
            Selection::Moved { pending, .. } | Selection::AttackRange { pending, .. } => *pending,
            _ => {
                return Err(BattleError::InvalidSelection {
                    operation: "cancel_move",
                });
            }
        };

        let unit = self
            .roster
            .get_mut(pending.unit)
            .ok_or(BattleError::UnitNotFound(pending.unit))?;
        unit.position = pending.origin;
        unit.facing = pending.origin_facing;

        let reachable = match self.roster.get(pending.unit) {
            Some(unit) => self.config.reach_mode.reachable(unit, &self.terrain, &self.roster),
            None => Vec::new(),
        };

        tracing::debug!(unit = %pending.unit, origin = %pending.origin, "move cancelled");
        self.emit(BattleEvent::MoveCancelled {
            unit: pending.unit,
            position: pending.origin,
        });
        self.selection = Selection::MoveRange {
            unit: pending.unit,
            reachable: reachable.clone(),
        };
        Ok(reachable)
    }

    /// Opens target selection and returns the enemies inside the annulus.
    pub fn show_attack_range(&mut self) -> Result<Vec<UnitId>, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        let Selection::Moved {
            pending,
            attack_cells,
        } = &self.selection
        else {
            return Err(BattleError::InvalidSelection {
                operation: "show_attack_range",
            });
        };

        let targets: Vec<UnitId> = self
            .roster
            .living_on(Side::Enemy)
            .filter(|enemy| attack_cells.contains(&enemy.position))
            .map(|enemy| enemy.id)
            .collect();

        self.selection = Selection::AttackRange {
            pending: *pending,
            attack_cells: attack_cells.clone(),
            targets: targets.clone(),
        };
        Ok(targets)
    }

    /// Builds the preview for striking `target`; it must be confirmed or
    /// cancelled before anything is applied.
    pub fn choose_target(&mut self, target: UnitId) -> Result<CombatForecast, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        let Selection::AttackRange {
            pending,
            attack_cells,
            targets,
        } = &self.selection
        else {
            return Err(BattleError::InvalidSelection {
                operation: "choose_target",
            });
        };

        let defender = self
            .roster
            .get(target)
            .ok_or(BattleError::UnitNotFound(target))?;
        if defender.side != Side::Enemy || !defender.is_alive() {
            return Err(BattleError::InvalidTarget(target));
        }
        if !attack_cells.contains(&defender.position) {
            return Err(BattleError::TargetOutOfRange(target));
        }
        let attacker = self
            .roster
            .get(pending.unit)
            .ok_or(BattleError::UnitNotFound(pending.unit))?;

        let preview = forecast(attacker, defender, &self.terrain);
        let selection = Selection::Preview {
            pending: *pending,
            attack_cells: attack_cells.clone(),
            targets: targets.clone(),
            forecast: preview.clone(),
        };

        tracing::debug!(
            attacker = %pending.unit,
            defender = %target,
            damage = preview.strike.damage,
            hit_rate = preview.strike.hit_rate,
            "attack previewed"
        );
        self.selection = selection;
        self.emit(BattleEvent::AttackPreviewed {
            forecast: preview.clone(),
        });
        Ok(preview)
    }

    /// Steps back one stage: preview -> attack range -> moved.
    pub fn cancel_attack(&mut self) -> Result<(), BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        self.selection = match std::mem::take(&mut self.selection) {
            Selection::Preview {
                pending,
                attack_cells,
                targets,
                ..
            } => Selection::AttackRange {
                pending,
                attack_cells,
                targets,
            },
            Selection::AttackRange {
                pending,
                attack_cells,
                ..
            } => Selection::Moved {
                pending,
                attack_cells,
            },
            other => {
                self.selection = other;
                return Err(BattleError::InvalidSelection {
                    operation: "cancel_attack",
                });
            }
        };
        Ok(())
    }

    /// Applies the previewed attack.
    ///
    /// Order: strike, counter, attacker marked as acted, selection cleared,
    /// then a single win/loss check.
    pub fn confirm_attack(&mut self) -> Result<Engagement, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        let Selection::Preview { forecast, .. } = &self.selection else {
            return Err(BattleError::NoPendingPreview);
        };
        let (attacker, defender) = (forecast.attacker, forecast.defender);

        let engagement = self.engage(attacker, defender)?;
        self.mark_acted(attacker);
        self.selection = Selection::Idle;
        if !self.check_outcome() {
            self.auto_end_turn();
        }
        Ok(engagement)
    }

    /// Ends the selected unit's action without attacking, keeping any move.
    pub fn wait_selected(&mut self) -> Result<(), BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        let id = match &self.selection {
            Selection::MoveRange { unit, .. } => *unit,
            Selection::Moved { pending, .. } | Selection::AttackRange { pending, .. } => pending.unit,
            Selection::Idle | Selection::Preview { .. } => {
                return Err(BattleError::InvalidSelection {
                    operation: "wait_selected",
                });
            }
        };

        self.mark_acted(id);
        self.selection = Selection::Idle;
        tracing::debug!(unit = %id, "unit waits");
        self.emit(BattleEvent::UnitWaited { unit: id });
        self.auto_end_turn();
        Ok(())
    }

    /// Hands the phase to the enemy.
    ///
    /// A pending move is kept; every living player unit counts as having
    /// acted.
    pub fn end_turn(&mut self) -> Result<(), BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        self.selection = Selection::Idle;
        for unit in self.roster.units_on_mut(Side::Player) {
            if unit.is_alive() {
                unit.has_acted = true;
            }
        }
        self.begin_enemy_phase();
        Ok(())
    }

    fn ready_player_unit(&self, id: UnitId) -> Result<&Unit, BattleError> {
        let unit = self.roster.get(id).ok_or(BattleError::UnitNotFound(id))?;
        if unit.side != Side::Player {
            return Err(BattleError::NotPlayerUnit(id));
        }
        if !unit.is_alive() {
            return Err(BattleError::UnitDefeated(id));
        }
        if unit.has_acted {
            return Err(BattleError::AlreadyActed(id));
        }
        Ok(unit)
    }

    fn auto_end_turn(&mut self) {
        if !self.config.auto_end_turn || self.phase != BattlePhase::PlayerTurn {
            return;
        }
        if self.roster.living_on(Side::Player).all(|unit| unit.has_acted) {
            tracing::debug!(turn = self.turn, "every player unit acted; ending turn");
            self.begin_enemy_phase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{duel, started};
    use super::*;
    use crate::state::Facing;

    #[test]
    fn selecting_requires_a_ready_player_unit() {
        let mut battle = started(duel(), 1);
        assert_eq!(battle.select_unit(UnitId(2)), Err(BattleError::NotPlayerUnit(UnitId(2))));
        assert_eq!(battle.select_unit(UnitId(9)), Err(BattleError::UnitNotFound(UnitId(9))));
        assert!(battle.select_unit(UnitId(1)).is_ok());
    }

    #[test]
    fn move_then_cancel_restores_position_and_facing() {
        let mut battle = started(duel(), 1);
        battle.select_unit(UnitId(1)).unwrap();
        battle.move_selected(Position::new(13, 4)).unwrap();

        let knight = battle.unit(UnitId(1)).unwrap();
        assert_eq!(knight.position, Position::new(13, 4));
        assert_eq!(knight.facing, Facing::East);

        let reachable = battle.cancel_move().unwrap();
        assert_eq!(reachable.len(), 31);
        let knight = battle.unit(UnitId(1)).unwrap();
        assert_eq!(knight.position, Position::new(13, 1));
        assert_eq!(knight.facing, Facing::South);
        assert!(matches!(battle.selection(), Selection::MoveRange { .. }));
    }

    #[test]
    fn rejected_moves_leave_state_unchanged() {
        let mut battle = started(duel(), 1);
        battle.select_unit(UnitId(1)).unwrap();
        let before = battle.snapshot();

        assert_eq!(
            battle.move_selected(Position::new(0, 0)),
            Err(BattleError::Unreachable {
                unit: UnitId(1),
                destination: Position::new(0, 0)
            })
        );
        assert_eq!(
            battle.move_selected(Position::new(-1, 3)),
            Err(BattleError::OutOfBounds(Position::new(-1, 3)))
        );
        assert_eq!(battle.confirm_attack(), Err(BattleError::NoPendingPreview));
        assert_eq!(battle.snapshot(), before);
    }

    #[test]
    fn staying_put_allows_acting_in_place() {
        let mut battle = started(duel(), 1);
        battle.select_unit(UnitId(1)).unwrap();
        let cells = battle.move_selected(Position::new(13, 1)).unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(battle.show_attack_range().unwrap(), Vec::<UnitId>::new());
        battle.cancel_attack().unwrap();
        battle.wait_selected().unwrap();
        // Auto end turn passed the phase to the enemy.
        assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
    }
}
