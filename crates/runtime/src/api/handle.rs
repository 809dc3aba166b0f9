//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! driving the battle or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use tactics_core::{BattleCommand, BattleSnapshot, UnitId};

use super::errors::{Result, RuntimeError};
use super::types::{EnemyTick, Observation};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a running battle
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Apply one command and return the snapshot that followed it.
    pub async fn apply(&self, command: BattleCommand) -> Result<BattleSnapshot> {
        self.request(|reply| Command::Apply { command, reply })
            .await?
    }

    /// Let exactly one enemy unit act.
    pub async fn advance_enemy(&self) -> Result<EnemyTick> {
        self.request(|reply| Command::AdvanceEnemy { reply }).await?
    }

    /// Query the current battle (read-only view)
    pub async fn observe(&self) -> Result<Observation> {
        self.request(|reply| Command::Observe { reply }).await
    }

    pub async fn start(&self) -> Result<BattleSnapshot> {
        self.apply(BattleCommand::Start).await
    }

    pub async fn select(&self, unit: UnitId) -> Result<BattleSnapshot> {
        self.apply(BattleCommand::Select { unit }).await
    }

    pub async fn end_turn(&self) -> Result<BattleSnapshot> {
        self.apply(BattleCommand::EndTurn).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Discrete battle events
    /// - `Topic::Snapshot` - Snapshot after every state change
    /// - `Topic::Outcome` - Final report
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactics_runtime::Topic;
    ///
    /// let mut rx = handle.subscribe(Topic::Battle);
    /// while let Ok(event) = rx.recv().await {
    ///     // Render or log the event
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
