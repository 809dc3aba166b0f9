//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{BattleConfig, Scenario};

use crate::builtin::builtin_scenario;
use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     ├── skirmish.ron
///     └── river_ford.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load battle configuration from `config.toml`.
    ///
    /// A missing file yields [`BattleConfig::default`]; a malformed one is an error.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.scenario_path(name);
        ScenarioLoader::load(&path)
    }

    /// Resolve a scenario by name: data files first, then the built-in set.
    pub fn resolve_scenario(&self, name: &str) -> LoadResult<Scenario> {
        if self.scenario_path(name).exists() {
            return self.load_scenario(name);
        }
        builtin_scenario(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown scenario '{}' (no file in {} and no built-in)",
                name,
                self.data_dir.join("scenarios").display()
            )
        })
    }

    /// Names of the scenario files under `scenarios/`, sorted.
    pub fn list_scenarios(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("scenarios");
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{name}.ron"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), BattleConfig::default());
        assert!(factory.list_scenarios().unwrap().is_empty());
    }

    #[test]
    fn resolve_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.resolve_scenario("skirmish").unwrap().name, "skirmish");
        assert!(factory.resolve_scenario("atlantis").is_err());
    }
}
