//! Pacing between enemy actions.
//!
//! The battle core has no notion of time; a session awaits its [`Pacer`]
//! after every enemy step so a presentation layer can animate. Pacing never
//! changes the order or the outcome of actions.

use std::time::Duration;

use async_trait::async_trait;
use tactics_core::EnemyStep;

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self, step: &EnemyStep);
}

/// Returns immediately. Used by tests and headless simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pace(&self, _step: &EnemyStep) {}
}

/// Sleeps a fixed duration after each enemy step.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pace(&self, step: &EnemyStep) {
        tracing::trace!(unit = %step.unit, delay_ms = self.delay.as_millis() as u64, "pacing");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tactics_core::{EnemyAction, UnitId};

    #[tokio::test]
    async fn fixed_delay_sleeps() {
        let step = EnemyStep {
            unit: UnitId(7),
            action: EnemyAction::Waited,
        };
        let started = Instant::now();
        FixedDelay::new(Duration::from_millis(15)).pace(&step).await;
        assert!(started.elapsed() >= Duration::from_millis(15));
        NoPacing.pace(&step).await;
    }
}
