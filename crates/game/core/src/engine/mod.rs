//! Battle orchestration.
//!
//! [`Battle`] is the authoritative owner of one battle instance. It runs the
//! phase state machine, the player selection flow and the enemy phase, and it
//! is the only place the roster is mutated. Every request is validated before
//! anything changes, so a rejected call leaves the battle untouched.
//!
//! Presentation layers observe the battle through [`Battle::snapshot`] and the
//! buffered [`BattleEvent`] stream; the progression system reads
//! [`Battle::report`] once the battle reaches a terminal phase.

mod command;
mod enemy;
mod engagement;
mod errors;
mod events;
mod phase;
mod player;
mod selection;
mod snapshot;

pub use command::BattleCommand;
pub use enemy::{EnemyAction, EnemyStep};
pub use engagement::Engagement;
pub use errors::{BattleError, SetupError};
pub use events::BattleEvent;
pub use phase::{BattleOutcome, BattlePhase};
pub use selection::{PendingMove, Selection, UnitActionState};
pub use snapshot::{BattleReport, BattleSnapshot, SurvivorRecord};

use std::collections::VecDeque;
use std::fmt;

use crate::ai::{ChaseAi, UnitAi};
use crate::config::BattleConfig;
use crate::env::{PcgRng, RngOracle, TerrainMap};
use crate::movement::find_path;
use crate::scenario::Scenario;
use crate::state::{Facing, Position, Roster, Side, Unit, UnitId};

/// One battle instance, from setup to victory or defeat.
pub struct Battle {
    name: String,
    config: BattleConfig,
    terrain: TerrainMap,
    roster: Roster,
    phase: BattlePhase,
    turn: u32,
    selection: Selection,
    /// Enemies still to act this enemy phase, roster order.
    enemy_queue: VecDeque<UnitId>,
    /// Resolved engagements so far; nonce for roll seeds.
    engagements: u64,
    events: Vec<BattleEvent>,
    rng: Box<dyn RngOracle>,
    ai: Box<dyn UnitAi>,
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("selection", &self.selection)
            .field("engagements", &self.engagements)
            .finish_non_exhaustive()
    }
}

impl Battle {
    /// Validates the scenario, builds its terrain and returns an idle battle.
    pub fn new(
        scenario: Scenario,
        config: BattleConfig,
        rng: Box<dyn RngOracle>,
        ai: Box<dyn UnitAi>,
    ) -> Result<Self, SetupError> {
        scenario.validate()?;
        let terrain = scenario.build_terrain(rng.as_ref());

        tracing::info!(
            scenario = %scenario.name,
            units = scenario.units.len(),
            reach_mode = ?config.reach_mode,
            "battle created"
        );

        Ok(Self {
            name: scenario.name,
            config,
            terrain,
            roster: Roster::new(scenario.units),
            phase: BattlePhase::Idle,
            turn: 0,
            selection: Selection::Idle,
            enemy_queue: VecDeque::new(),
            engagements: 0,
            events: Vec::new(),
            rng,
            ai,
        })
    }

    /// Builder with [`PcgRng`], [`ChaseAi`] and the default configuration.
    pub fn builder(scenario: Scenario) -> BattleBuilder {
        BattleBuilder::new(scenario)
    }

    /// `Idle -> PlayerTurn`, turn 1.
    pub fn start(&mut self) -> Result<(), BattleError> {
        self.require_phase(BattlePhase::Idle)?;
        self.turn = 1;
        for unit in self.roster.units_on_mut(Side::Player) {
            unit.has_acted = false;
        }
        self.set_phase(BattlePhase::PlayerTurn);
        Ok(())
    }

    // ===== queries =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn terrain(&self) -> &TerrainMap {
        &self.terrain
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Where `id` stands in the selection flow; `None` for unknown units.
    pub fn action_state(&self, id: UnitId) -> Option<UnitActionState> {
        let unit = self.roster.get(id)?;
        if unit.has_acted {
            return Some(UnitActionState::Resolved);
        }
        if self.selection.unit() == Some(id) {
            Some(self.selection.state())
        } else {
            Some(UnitActionState::Unselected)
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot::capture(
            self.phase,
            self.turn,
            self.roster.iter().cloned().collect(),
            &self.selection,
        )
    }

    /// Takes every event emitted since the previous drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Outcome summary, available once the battle is over.
    pub fn report(&self) -> Option<BattleReport> {
        let outcome = self.phase.outcome()?;
        Some(BattleReport {
            scenario: self.name.clone(),
            outcome,
            turns: self.turn,
            survivors: self
                .roster
                .living_on(Side::Player)
                .map(SurvivorRecord::from)
                .collect(),
        })
    }

    // ===== internals shared by the player and enemy flows =====

    fn require_phase(&self, expected: BattlePhase) -> Result<(), BattleError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(BattleError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn emit(&mut self, event: BattleEvent) {
        tracing::trace!(kind = event.kind(), "battle event");
        self.events.push(event);
    }

    fn set_phase(&mut self, phase: BattlePhase) {
        tracing::info!(from = %self.phase, to = %phase, turn = self.turn, "phase changed");
        self.phase = phase;
        self.emit(BattleEvent::PhaseChanged {
            phase,
            turn: self.turn,
        });
    }

    /// Facing after walking to `destination`: the direction of the final step
    /// on the cheapest route. Staying put keeps the current facing.
    fn arrival_facing(&self, unit: &Unit, destination: Position) -> Facing {
        if destination == unit.position {
            return unit.facing;
        }
        find_path(unit.position, destination, &self.terrain, &self.roster, unit)
            .and_then(|path| match path.as_slice() {
                [.., before, last] => Some(Facing::toward(*before, *last)),
                _ => None,
            })
            .unwrap_or_else(|| Facing::toward(unit.position, destination))
    }

    /// Moves `id` to `destination`, turning it along its last step.
    /// Returns the cell it left.
    fn relocate(&mut self, id: UnitId, destination: Position) -> Option<Position> {
        let unit = self.roster.get(id)?;
        let from = unit.position;
        let facing = self.arrival_facing(unit, destination);

        let unit = self.roster.get_mut(id)?;
        unit.position = destination;
        unit.facing = facing;

        if from != destination {
            tracing::debug!(unit = %id, %from, to = %destination, ?facing, "unit moved");
            self.emit(BattleEvent::UnitMoved {
                unit: id,
                from,
                to: destination,
            });
        }
        Some(from)
    }

    fn mark_acted(&mut self, id: UnitId) {
        if let Some(unit) = self.roster.get_mut(id) {
            unit.has_acted = true;
        }
    }

    /// Win/loss check run once after each combat resolution.
    /// Returns true when the battle just ended.
    fn check_outcome(&mut self) -> bool {
        let (phase, event) = if self.roster.all_defeated(Side::Enemy) {
            (BattlePhase::Victory, BattleEvent::Victory { turn: self.turn })
        } else if self.roster.all_defeated(Side::Player) {
            (BattlePhase::Defeat, BattleEvent::Defeat { turn: self.turn })
        } else {
            return false;
        };

        self.selection = Selection::Idle;
        self.enemy_queue.clear();
        self.set_phase(phase);
        self.emit(event);
        tracing::info!(scenario = %self.name, outcome = %phase, turn = self.turn, "battle finished");
        true
    }
}

/// Fluent construction for [`Battle`].
pub struct BattleBuilder {
    scenario: Scenario,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    ai: Box<dyn UnitAi>,
}

impl BattleBuilder {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            config: BattleConfig::default(),
            rng: Box::new(PcgRng),
            ai: Box::new(ChaseAi),
        }
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn ai(mut self, ai: impl UnitAi + 'static) -> Self {
        self.ai = Box::new(ai);
        self
    }

    pub fn build(self) -> Result<Battle, SetupError> {
        Battle::new(self.scenario, self.config, self.rng, self.ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRollRng, TerrainKind};
    use crate::scenario::TerrainSpec;
    use crate::state::GridDimensions;

    pub(super) fn duel() -> Scenario {
        Scenario::new("duel", GridDimensions::STANDARD)
            .with_terrain(TerrainSpec::Uniform(TerrainKind::Plain))
            .with_unit(
                Unit::new(UnitId(1), "Knight", Side::Player, Position::new(13, 1))
                    .with_hp(40)
                    .with_attack(30)
                    .with_defense(20),
            )
            .with_unit(
                Unit::new(UnitId(2), "Brute", Side::Enemy, Position::new(3, 12))
                    .with_hp(40)
                    .with_attack(25)
                    .with_defense(15)
                    .with_movement(6),
            )
    }

    pub(super) fn started(scenario: Scenario, roll: u32) -> Battle {
        let mut battle = Battle::builder(scenario).rng(FixedRollRng(roll)).build().unwrap();
        battle.start().unwrap();
        battle.drain_events();
        battle
    }

    #[test]
    fn new_battle_is_idle_until_started() {
        let mut battle = Battle::builder(duel()).build().unwrap();
        assert_eq!(battle.phase(), BattlePhase::Idle);
        assert_eq!(battle.turn(), 0);
        assert!(battle.report().is_none());

        battle.start().unwrap();
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
        assert_eq!(battle.turn(), 1);
        assert_eq!(
            battle.drain_events(),
            vec![BattleEvent::PhaseChanged {
                phase: BattlePhase::PlayerTurn,
                turn: 1
            }]
        );
        assert_eq!(
            battle.start(),
            Err(BattleError::WrongPhase {
                expected: BattlePhase::Idle,
                actual: BattlePhase::PlayerTurn
            })
        );
    }

    #[test]
    fn invalid_scenario_is_rejected() {
        let scenario = Scenario::new("empty", GridDimensions::STANDARD);
        assert_eq!(Battle::builder(scenario).build().unwrap_err(), SetupError::EmptyRoster);
    }

    #[test]
    fn snapshot_mirrors_selection() {
        let mut battle = started(duel(), 1);
        battle.select_unit(UnitId(1)).unwrap();
        let snapshot = battle.snapshot();
        assert_eq!(snapshot.selected, Some(UnitId(1)));
        // Radius-5 ball around (13, 1) clipped by the south and west edges
        assert_eq!(snapshot.reachable.len(), 31);
        assert!(snapshot.attack_cells.is_empty());
        assert_eq!(snapshot.units.len(), 2);
    }
}
