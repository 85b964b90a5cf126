use crate::infra::line_diff::LineDiffOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for the diff pipeline, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget for one diff computation, in milliseconds.
    pub max_computation_time_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_computation_time_ms: 200,
        }
    }
}

impl EngineConfig {
    pub fn line_diff_options(&self) -> LineDiffOptions {
        LineDiffOptions {
            max_computation_time: Duration::from_millis(self.max_computation_time_ms),
            ..Default::default()
        }
    }
}

pub fn load_config() -> EngineConfig {
    load_config_from(&config_path())
}

pub fn save_config(config: &EngineConfig) -> std::io::Result<()> {
    save_config_to(config, &config_path())
}

fn load_config_from(path: &Path) -> EngineConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return EngineConfig::default();
    };
    toml::from_str(&contents).unwrap_or_default()
}

fn save_config_to(config: &EngineConfig, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(path, contents)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("REDRAFT_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from("redraft.toml")
}
