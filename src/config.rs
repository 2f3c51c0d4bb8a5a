//! Session configuration loader - parses floodwarn.toml
//!
//! Separates the geographic filter and polling cadence from code, so a
//! deployment can be retargeted to a different location without
//! recompiling the service.

use crate::coordinator::PollConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::time::Duration;

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_VAR: &str = "FLOODWARN_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "floodwarn.toml";

/// Geographic filter for the polling session, captured once at setup time
/// and immutable for the life of the coordinator.
///
/// The values are deliberately strings: they are substituted verbatim into
/// the request URLs and the upstream API does its own interpretation.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub latitude: String,
    pub longitude: String,
    /// Search radius in kilometres.
    pub distance: String,
}

/// Polling cadence overrides. Both fields are optional in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// How often to poll the warnings resource (default: 15 minutes).
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Budget for one whole cycle, both fetches plus merge (default: 10 seconds).
    #[serde(default = "default_cycle_timeout_seconds")]
    pub cycle_timeout_seconds: u64,
}

fn default_interval_minutes() -> u64 {
    15
}

fn default_cycle_timeout_seconds() -> u64 {
    10
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            cycle_timeout_seconds: default_cycle_timeout_seconds(),
        }
    }
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub session: SessionConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

impl ServiceConfig {
    /// Converts the polling section into the coordinator's `PollConfig`.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            poll_interval: Duration::from_secs(self.polling.interval_minutes * 60),
            cycle_timeout: Duration::from_secs(self.polling.cycle_timeout_seconds),
        }
    }
}

/// Loads the service configuration from `floodwarn.toml` in the working
/// directory, or from the path named by `FLOODWARN_CONFIG`.
///
/// # Panics
/// Panics if the configuration file is missing or malformed. This is
/// intentional — the service cannot operate without a geographic filter.
pub fn load_config() -> ServiceConfig {
    let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config_from(&path)
}

/// Loads the service configuration from an explicit path.
///
/// # Panics
/// Same policy as [`load_config`].
pub fn load_config_from(path: &str) -> ServiceConfig {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

    toml::from_str(&contents).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}
