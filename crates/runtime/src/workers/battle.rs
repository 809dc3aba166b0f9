//! Battle worker that owns the authoritative [`tactics_core::Battle`].
//!
//! Receives commands from [`crate::SessionHandle`], applies them to the
//! battle and publishes the drained events plus a fresh snapshot to the
//! [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use tactics_core::{Battle, BattleCommand, BattleSnapshot, GameError};

use crate::api::{EnemyTick, Observation, Result};
use crate::events::{Event, EventBus};

/// Commands that can be sent to the battle worker
pub(crate) enum Command {
    /// Apply one player-facing command.
    Apply {
        command: BattleCommand,
        reply: oneshot::Sender<Result<BattleSnapshot>>,
    },
    /// Let exactly one enemy unit act.
    AdvanceEnemy {
        reply: oneshot::Sender<Result<EnemyTick>>,
    },
    /// Read-only view of the current battle.
    Observe { reply: oneshot::Sender<Observation> },
}

/// Background task that processes battle commands.
///
/// The worker is the only owner of the battle; every mutation happens on
/// this task, in the order commands arrive.
pub(crate) struct BattleWorker {
    battle: Battle,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    reported: bool,
}

impl BattleWorker {
    pub(crate) fn new(battle: Battle, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        info!(
            scenario = battle.name(),
            units = battle.roster().len(),
            "BattleWorker initialized"
        );
        Self {
            battle,
            command_rx,
            event_bus,
            reported: false,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub(crate) async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(scenario = self.battle.name(), "BattleWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Apply { command, reply } => {
                let result = self.apply(command);
                if reply.send(result).is_err() {
                    debug!("Apply reply channel closed (caller dropped)");
                }
            }
            Command::AdvanceEnemy { reply } => {
                let result = self.advance_enemy();
                if reply.send(result).is_err() {
                    debug!("AdvanceEnemy reply channel closed (caller dropped)");
                }
            }
            Command::Observe { reply } => {
                if reply.send(self.observe()).is_err() {
                    debug!("Observe reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn apply(&mut self, command: BattleCommand) -> Result<BattleSnapshot> {
        let result = self.battle.apply(command);
        if let Err(error) = &result {
            warn!(
                ?command,
                code = error.error_code(),
                "Battle command rejected: {}",
                error
            );
        }
        self.publish(result.is_ok());
        result?;
        Ok(self.battle.snapshot())
    }

    fn advance_enemy(&mut self) -> Result<EnemyTick> {
        let result = self.battle.advance_enemy();
        self.publish(result.is_ok());
        let step = result?;
        Ok(EnemyTick {
            step,
            phase: self.battle.phase(),
        })
    }

    fn observe(&self) -> Observation {
        Observation {
            scenario: self.battle.name().to_string(),
            snapshot: self.battle.snapshot(),
            terrain: self.battle.terrain().clone(),
            config: self.battle.config().clone(),
            report: self.battle.report(),
        }
    }

    /// Forwards drained events, then the snapshot, then the report once.
    fn publish(&mut self, changed: bool) {
        let events = self.battle.drain_events();
        if !changed && events.is_empty() {
            return;
        }
        for event in events {
            self.event_bus.publish(Event::Battle(event));
        }
        self.event_bus.publish(Event::Snapshot(self.battle.snapshot()));

        if !self.reported
            && let Some(report) = self.battle.report()
        {
            info!(
                scenario = %report.scenario,
                outcome = ?report.outcome,
                turns = report.turns,
                "Battle finished"
            );
            self.reported = true;
            self.event_bus.publish(Event::Outcome(report));
        }
    }
}
