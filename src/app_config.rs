use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Lyrics database API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Proof-of-work solver tuning
    #[serde(default)]
    pub solver: SolverSection,

    /// Live validation settings
    #[serde(default)]
    pub live: LiveSection,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Lyrics database API settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base endpoint URL of the publish API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Proof-of-work solver tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SolverSection {
    /// Attempts between progress snapshots
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,

    /// Optional attempt ceiling; the default search is unbounded
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            progress_interval: default_progress_interval(),
            max_attempts: None,
        }
    }
}

/// Live validation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LiveSection {
    /// Idle window in milliseconds before a scheduled validation runs
    #[serde(default = "default_idle_window_ms")]
    pub idle_window_ms: u64,
}

impl Default for LiveSection {
    fn default() -> Self {
        Self {
            idle_window_ms: default_idle_window_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_endpoint() -> String {
    crate::client::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_progress_interval() -> u64 {
    crate::challenge::solver::DEFAULT_PROGRESS_INTERVAL
}

fn default_idle_window_ms() -> u64 {
    1000
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.api.endpoint, e))?;

        if self.api.timeout_secs == 0 {
            return Err(anyhow!("API timeout must be at least one second"));
        }

        if self.solver.progress_interval == 0 {
            return Err(anyhow!("Solver progress interval must be positive"));
        }

        if self.solver.max_attempts == Some(0) {
            return Err(anyhow!("Solver attempt ceiling must be positive when set"));
        }

        Ok(())
    }

    /// Solver configuration derived from this config
    pub fn solver_config(&self) -> crate::challenge::SolverConfig {
        crate::challenge::SolverConfig {
            progress_interval: self.solver.progress_interval,
            max_attempts: self.solver.max_attempts,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            solver: SolverSection::default(),
            live: LiveSection::default(),
            log_level: LogLevel::default(),
        }
    }
}
