//! High-level battle session.
//!
//! The session owns the battle worker, wires up the command channel and the
//! event bus, and drives a battle to completion with an injected player
//! [`CommandProvider`], a [`Pacer`] between enemy steps and any number of
//! [`OutcomeSink`]s for the final report.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use tactics_core::{Battle, BattlePhase, BattleReport, EnemyStep};

use crate::api::{
    AutoPlayer, CommandProvider, OutcomeSink, Result, RuntimeError, SessionHandle,
};
use crate::events::{Event, EventBus, Topic};
use crate::pacing::{FixedDelay, NoPacing, Pacer};
use crate::workers::{BattleWorker, Command};

/// Session configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Delay after each enemy step when no pacer is injected. `None` means
    /// no pacing at all.
    pub enemy_step_delay: Option<Duration>,
    /// A battle still running after this many turns is abandoned.
    pub max_turns: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            enemy_step_delay: None,
            max_turns: 100,
        }
    }
}

/// Runs one battle on a background worker.
///
/// [`SessionHandle`] provides a cloneable façade for presentation layers
/// that want to observe or issue commands themselves.
pub struct Session {
    handle: SessionHandle,
    config: SessionConfig,
    player: Box<dyn CommandProvider>,
    pacer: Box<dyn Pacer>,
    sinks: Vec<Box<dyn OutcomeSink>>,
    worker_handle: JoinHandle<()>,
}

impl Session {
    /// Create a new session builder
    pub fn builder(battle: Battle) -> SessionBuilder {
        SessionBuilder::new(battle)
    }

    /// Get a cloneable handle to the battle worker
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Plays the current player phase with the configured provider.
    ///
    /// Returns once the phase has left `PlayerTurn`.
    pub async fn play_player_phase(&self) -> Result<()> {
        loop {
            let observation = self.handle.observe().await?;
            if observation.phase() != BattlePhase::PlayerTurn {
                return Ok(());
            }

            let plan = self.player.plan(&observation).await?;
            if plan.is_empty() {
                return Err(RuntimeError::EmptyPlan);
            }
            debug!(commands = plan.len(), "applying player plan");
            for command in plan {
                let snapshot = self.handle.apply(command).await?;
                if snapshot.phase != BattlePhase::PlayerTurn {
                    return Ok(());
                }
            }
        }
    }

    /// Runs the enemy phase one unit at a time, pacing after each step.
    pub async fn run_enemy_phase(&self) -> Result<Vec<EnemyStep>> {
        let mut steps = Vec::new();
        loop {
            let tick = self.handle.advance_enemy().await?;
            if let Some(step) = tick.step {
                self.pacer.pace(&step).await;
                steps.push(step);
            }
            if tick.phase != BattlePhase::EnemyTurn {
                return Ok(steps);
            }
        }
    }

    /// Starts the battle if needed and alternates phases until it ends.
    ///
    /// The report is handed to every sink before it is returned.
    pub async fn run_to_completion(&self) -> Result<BattleReport> {
        loop {
            let observation = self.handle.observe().await?;
            if let Some(report) = observation.report {
                self.deliver(&report).await?;
                return Ok(report);
            }
            if observation.snapshot.turn > self.config.max_turns {
                return Err(RuntimeError::TurnLimit {
                    limit: self.config.max_turns,
                });
            }

            match observation.phase() {
                BattlePhase::Idle => {
                    self.handle.start().await?;
                }
                BattlePhase::PlayerTurn => self.play_player_phase().await?,
                BattlePhase::EnemyTurn => {
                    self.run_enemy_phase().await?;
                }
                // A report exists for every terminal phase.
                BattlePhase::Victory | BattlePhase::Defeat => {}
            }
        }
    }

    async fn deliver(&self, report: &BattleReport) -> Result<()> {
        info!(
            scenario = %report.scenario,
            outcome = ?report.outcome,
            turns = report.turns,
            survivors = report.survivors.len(),
            "Delivering battle report"
        );
        for sink in &self.sinks {
            sink.record(report).await?;
        }
        Ok(())
    }

    /// Shutdown the session gracefully
    ///
    /// The worker stops once every outstanding [`SessionHandle`] is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    battle: Battle,
    config: SessionConfig,
    player: Option<Box<dyn CommandProvider>>,
    pacer: Option<Box<dyn Pacer>>,
    sinks: Vec<Box<dyn OutcomeSink>>,
}

impl SessionBuilder {
    fn new(battle: Battle) -> Self {
        Self {
            battle,
            config: SessionConfig::default(),
            player: None,
            pacer: None,
            sinks: Vec::new(),
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the player command provider. Defaults to [`AutoPlayer`].
    pub fn player(mut self, provider: impl CommandProvider + 'static) -> Self {
        self.player = Some(Box::new(provider));
        self
    }

    /// Set the pacer. Defaults to [`FixedDelay`] when the config carries a
    /// delay, [`NoPacing`] otherwise.
    pub fn pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Some(Box::new(pacer));
        self
    }

    pub fn sink(mut self, sink: impl OutcomeSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Spawn the worker and build the session.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Session {
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = SessionHandle::new(command_tx, event_bus.clone());

        let worker = BattleWorker::new(self.battle, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let pacer: Box<dyn Pacer> = match (self.pacer, self.config.enemy_step_delay) {
            (Some(pacer), _) => pacer,
            (None, Some(delay)) => Box::new(FixedDelay::new(delay)),
            (None, None) => Box::new(NoPacing),
        };
        let player: Box<dyn CommandProvider> = match self.player {
            Some(player) => player,
            None => Box::new(AutoPlayer::default()),
        };

        Session {
            handle,
            config: self.config,
            player,
            pacer,
            sinks: self.sinks,
            worker_handle,
        }
    }
}
