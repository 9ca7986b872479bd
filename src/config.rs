use crate::model::delta_chain::DEFAULT_LONG_REPLAY_WARNING;
use crate::model::memory::DEFAULT_EDIT_OVERHEAD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub scenario: ScenarioConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// How sessions keep their history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Fixed bytes charged per recorded edit in the memory model
    #[serde(default = "default_edit_overhead")]
    pub edit_overhead_bytes: usize,

    /// Take checkpoint 0 (a full copy of the base) when a session opens
    #[serde(default = "default_true")]
    pub checkpoint_on_open: bool,

    /// Restores replaying more edits than this are logged as warnings
    #[serde(default = "default_long_replay_warning")]
    pub long_replay_warning: usize,
}

fn default_edit_overhead() -> usize {
    DEFAULT_EDIT_OVERHEAD
}

fn default_true() -> bool {
    true
}

fn default_long_replay_warning() -> usize {
    DEFAULT_LONG_REPLAY_WARNING
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            edit_overhead_bytes: default_edit_overhead(),
            checkpoint_on_open: true,
            long_replay_warning: default_long_replay_warning(),
        }
    }
}

/// Parameters of the built-in large file scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_large_file_lines")]
    pub large_file_lines: usize,

    /// Number of small commits appended to the large file
    #[serde(default = "default_commits")]
    pub commits: usize,
}

fn default_large_file_lines() -> usize {
    5000
}

fn default_commits() -> usize {
    10
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            large_file_lines: default_large_file_lines(),
            commits: default_commits(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Print the git-log style list of recorded edits
    #[serde(default = "default_true")]
    pub show_change_log: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_change_log: true,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.edit_overhead_bytes > 4096 {
            return Err(ConfigError::ValidationError(
                "edit_overhead_bytes must be <= 4096".to_string(),
            ));
        }

        if self.scenario.large_file_lines == 0 {
            return Err(ConfigError::ValidationError(
                "large_file_lines must be greater than 0".to_string(),
            ));
        }

        if self.scenario.commits == 0 {
            return Err(ConfigError::ValidationError(
                "commits must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
