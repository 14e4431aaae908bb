//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub actions: ActionsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Step loop limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Consecutive failed steps before the run is aborted.
    #[serde(default = "default_max_failures")]
    pub max_failures: u32,

    #[serde(default = "default_max_actions_per_step")]
    pub max_actions_per_step: usize,

    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Send screenshots to the decision-maker.
    #[serde(default = "default_true")]
    pub use_vision: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_failures: default_max_failures(),
            max_actions_per_step: default_max_actions_per_step(),
            max_steps: default_max_steps(),
            use_vision: true,
        }
    }
}

fn default_max_failures() -> u32 {
    3
}

fn default_max_actions_per_step() -> usize {
    10
}

fn default_max_steps() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

/// Action registry settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// Actions never registered.
    #[serde(default)]
    pub excluded: Vec<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    /// `"pretty"` or `"json"`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Directory for daily-rotated log files. Console only when unset.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// Log directory with `~` expanded.
    pub fn directory_path(&self) -> Option<PathBuf> {
        self.directory
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}
