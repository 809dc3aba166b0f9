//! Human-readable battle log written through tracing.
use std::collections::HashMap;

use tactics_core::{BattleEvent, StrikeOutcome, StrikeResult, UnitId};
use tactics_runtime::{Event, SessionHandle, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

pub struct BattleLog {
    names: HashMap<UnitId, String>,
}

impl BattleLog {
    pub fn new(names: impl IntoIterator<Item = (UnitId, String)>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    fn name(&self, id: UnitId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("unit {}", id))
    }

    fn strike(&self, verb: &str, strike: &StrikeResult) -> String {
        let attacker = self.name(strike.attacker);
        let defender = self.name(strike.defender);
        let flank = if strike.backstab { " from behind" } else { "" };
        match strike.outcome {
            StrikeOutcome::Hit { damage } => format!(
                "{attacker} {verb} {defender}{flank} for {damage} damage ({} hp left)",
                strike.remaining_hp
            ),
            StrikeOutcome::Miss => format!(
                "{attacker} {verb} {defender}{flank} but misses (roll {} vs {}%)",
                strike.roll, strike.hit_rate
            ),
        }
    }

    /// Log line for an event; `None` for events only a UI cares about.
    pub fn describe(&self, event: &BattleEvent) -> Option<String> {
        let line = match event {
            BattleEvent::PhaseChanged { phase, turn } => format!("turn {turn}: {phase}"),
            BattleEvent::UnitMoved { unit, from, to } => {
                format!("{} moves {} -> {}", self.name(*unit), from, to)
            }
            BattleEvent::Attacked { strike } => self.strike("attacks", strike),
            BattleEvent::Countered { strike } => self.strike("counters", strike),
            BattleEvent::UnitDefeated { unit, side } => {
                format!("{} ({}) is defeated", self.name(*unit), side)
            }
            BattleEvent::UnitWaited { unit } => format!("{} waits", self.name(*unit)),
            BattleEvent::AiFailed { unit, error } => {
                format!("{} hesitates: {}", self.name(*unit), error)
            }
            BattleEvent::Victory { turn } => format!("victory on turn {turn}"),
            BattleEvent::Defeat { turn } => format!("defeat on turn {turn}"),
            BattleEvent::UnitSelected { .. }
            | BattleEvent::MoveCancelled { .. }
            | BattleEvent::AttackPreviewed { .. } => return None,
        };
        Some(line)
    }

    /// Consumes the battle topic until the session closes it.
    pub fn spawn(self, handle: &SessionHandle) -> JoinHandle<()> {
        let mut events = handle.subscribe(Topic::Battle);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(Event::Battle(event)) => {
                        if let Some(line) = self.describe(&event) {
                            tracing::info!(target: "battle", "{}", line);
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "battle log fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
