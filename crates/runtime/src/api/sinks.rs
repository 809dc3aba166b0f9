//! Hand-off of finished battles to the progression layer.
use std::sync::Arc;

use async_trait::async_trait;
use tactics_core::BattleReport;
use tokio::sync::Mutex;

use super::errors::Result;

/// Receives the report of every battle a session completes.
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    async fn record(&self, report: &BattleReport) -> Result<()>;
}

/// Keeps reports in memory. Clones share the same storage.
#[derive(Clone, Default)]
pub struct CollectingSink {
    reports: Arc<Mutex<Vec<BattleReport>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reports(&self) -> Vec<BattleReport> {
        self.reports.lock().await.clone()
    }
}

#[async_trait]
impl OutcomeSink for CollectingSink {
    async fn record(&self, report: &BattleReport) -> Result<()> {
        self.reports.lock().await.push(report.clone());
        Ok(())
    }
}
