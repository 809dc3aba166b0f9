//! JSON output of finished battles.
use std::io::Write;

use async_trait::async_trait;
use serde::Serialize;
use tactics_core::BattleReport;
use tactics_runtime::{OutcomeSink, RuntimeError};

/// Document written to stdout once per battle.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub seed: u64,
    #[serde(flatten)]
    pub report: &'a BattleReport,
}

/// Writes each report as one JSON document on stdout.
pub struct JsonReportSink {
    seed: u64,
    pretty: bool,
}

impl JsonReportSink {
    pub fn new(seed: u64, pretty: bool) -> Self {
        Self { seed, pretty }
    }

    pub fn render(&self, report: &BattleReport) -> serde_json::Result<String> {
        let summary = RunSummary {
            seed: self.seed,
            report,
        };
        if self.pretty {
            serde_json::to_string_pretty(&summary)
        } else {
            serde_json::to_string(&summary)
        }
    }
}

#[async_trait]
impl OutcomeSink for JsonReportSink {
    async fn record(&self, report: &BattleReport) -> Result<(), RuntimeError> {
        let json = self
            .render(report)
            .map_err(|e| RuntimeError::Sink(e.to_string()))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").map_err(|e| RuntimeError::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{BattleOutcome, SurvivorRecord, UnitId};

    #[test]
    fn renders_flat_json() {
        let report = BattleReport {
            scenario: "skirmish".into(),
            outcome: BattleOutcome::Victory,
            turns: 4,
            survivors: vec![SurvivorRecord {
                id: UnitId(1),
                name: "Aldric".into(),
                hp: 12,
                max_hp: 40,
            }],
        };
        let json = JsonReportSink::new(7, false).render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["scenario"], "skirmish");
        assert_eq!(value["turns"], 4);
        assert_eq!(value["survivors"][0]["hp"], 12);
    }
}
