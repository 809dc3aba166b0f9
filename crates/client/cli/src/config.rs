//! Simulator configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one headless simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub scenario: String,
    /// Overrides the roll seed from `config.toml` when set.
    pub seed: Option<u64>,
    pub pacing: Option<Duration>,
    pub max_turns: u32,
    /// Content directory; the data bundled with `tactics-content` when unset.
    pub data_dir: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scenario: String::from("skirmish"),
            seed: None,
            pacing: None,
            max_turns: 100,
            data_dir: None,
            pretty: true,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_SCENARIO` - Scenario name (default: skirmish)
    /// - `TACTICS_SEED` - Roll seed override
    /// - `TACTICS_PACING_MS` - Delay after each enemy step (default: none)
    /// - `TACTICS_MAX_TURNS` - Turn limit before giving up (default: 100)
    /// - `TACTICS_DATA_DIR` - Content directory (default: bundled data)
    /// - `TACTICS_PRETTY` - Pretty-print the JSON report (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(scenario) = read("TACTICS_SCENARIO") {
            config.scenario = scenario.trim().to_string();
        }
        config.seed = read("TACTICS_SEED").and_then(|value| value.trim().parse().ok());
        config.pacing = read("TACTICS_PACING_MS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        if let Some(turns) = read("TACTICS_MAX_TURNS").and_then(|value| value.trim().parse::<u32>().ok()) {
            config.max_turns = turns.max(1);
        }
        config.data_dir = read("TACTICS_DATA_DIR").map(PathBuf::from);
        if let Some(pretty) = read("TACTICS_PRETTY").and_then(|value| value.trim().parse().ok()) {
            config.pretty = pretty;
        }
        config
    }
}
