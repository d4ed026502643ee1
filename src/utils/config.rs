//! Configuration and constants for the decoder and the CLI.
//!
//! Constants cover the reserved labels of the host runtime's framing
//! events. [`AppConfig`] is the optional TOML layer the CLI reads; every
//! field has a default so an empty file is valid.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Function label of the synthetic root frame
pub const ROOT_FUNCTION: &str = "TOP_LEVEL";

// Leading topics the host runtime uses to frame contract calls
pub const FN_CALL_TOPIC: &str = "fn_call";
pub const FN_RETURN_TOPIC: &str = "fn_return";

/// Event type reported for events with no symbol in the leading topic
pub const UNKNOWN_EVENT_TYPE: &str = "unknown";

// Ledger resource cost weights for estimating "expensive" calls
pub const COST_WEIGHT_STORAGE_WRITE: u64 = 3;
pub const COST_WEIGHT_AUTH: u64 = 2;
pub const COST_WEIGHT_DEFAULT: u64 = 1;

/// Number of contracts shown by the stats table
pub const DEFAULT_STATS_TOP_N: usize = 5;
pub const MAX_STATS_TOP_N: usize = 1000;

/// Contract id column width in the stats table
pub const STATS_CONTRACT_COLUMN: usize = 44;

// Event type tags recognised by the cost model
pub const STORAGE_WRITE_TYPES: &[&str] = &["storage_write"];
pub const AUTH_TYPES: &[&str] = &["require_auth", "auth"];

/// What to do with events emitted outside a successful top-level invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessPolicy {
    /// Keep every event, flag included
    #[default]
    Retain,
    /// Remove events whose success flag is false before classification
    DropFailed,
}

/// Options for a single decode call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(default)]
    pub success_policy: SuccessPolicy,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_success_policy(mut self, policy: SuccessPolicy) -> Self {
        self.success_policy = policy;
        self
    }
}

/// Weights of the cost model used by the stats aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostWeights {
    #[serde(default = "default_storage_write_weight")]
    pub storage_write: u64,
    #[serde(default = "default_auth_weight")]
    pub auth: u64,
    #[serde(default = "default_other_weight")]
    pub other: u64,
}

fn default_storage_write_weight() -> u64 {
    COST_WEIGHT_STORAGE_WRITE
}

fn default_auth_weight() -> u64 {
    COST_WEIGHT_AUTH
}

fn default_other_weight() -> u64 {
    COST_WEIGHT_DEFAULT
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            storage_write: COST_WEIGHT_STORAGE_WRITE,
            auth: COST_WEIGHT_AUTH,
            other: COST_WEIGHT_DEFAULT,
        }
    }
}

/// Stats aggregator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub weights: CostWeights,
}

fn default_top_n() -> usize {
    DEFAULT_STATS_TOP_N
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_STATS_TOP_N,
            weights: CostWeights::default(),
        }
    }
}

/// Complete configuration file
///
/// ```toml
/// [decode]
/// success_policy = "drop_failed"
///
/// [stats]
/// top_n = 10
/// weights = { storage_write = 5 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub decode: DecodeOptions,
    #[serde(default)]
    pub stats: StatsConfig,
}

impl AppConfig {
    /// Check values that parse fine but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.top_n == 0 || self.stats.top_n > MAX_STATS_TOP_N {
            return Err(ConfigError::Invalid(format!(
                "stats.top_n must be between 1 and {}, got {}",
                MAX_STATS_TOP_N, self.stats.top_n
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
