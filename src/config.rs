/*!
 * Simulator Configuration
 *
 * Runtime switches read from the environment.
 */

use crate::core::limits::{ENV_STATS_JSON, ENV_TRACE_JSON, ENV_VERIFY};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: expected one of 1/0, true/false, yes/no, on/off")]
    InvalidFlag { key: &'static str, value: String },
}

/// Configuration for one simulator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Emit logs as JSON (default: false)
    pub trace_json: bool,

    /// Validate allocator invariants after every request (default: false)
    pub verify: bool,

    /// Print final statistics as JSON on stderr (default: false)
    pub stats_json: bool,
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &'static str| -> Result<bool, ConfigError> {
            match lookup(key) {
                Some(value) => parse_flag(key, &value),
                None => Ok(false),
            }
        };

        Ok(Self {
            trace_json: flag(ENV_TRACE_JSON)?,
            verify: flag(ENV_VERIFY)?,
            stats_json: flag(ENV_STATS_JSON)?,
        })
    }

    pub fn with_trace_json(mut self, enabled: bool) -> Self {
        self.trace_json = enabled;
        self
    }

    pub fn with_verify(mut self, enabled: bool) -> Self {
        self.verify = enabled;
        self
    }

    pub fn with_stats_json(mut self, enabled: bool) -> Self {
        self.stats_json = enabled;
        self
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
