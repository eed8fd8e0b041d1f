//! Runtime configuration for the catalog client.
//!
//! Defaults target the public PokeAPI. Each field can be overridden from the
//! environment, which is how the mock server is swapped in for tests and
//! local runs.

use std::time::Duration;

use thiserror::Error;

use crate::client::DegradePolicy;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_VAR: &str = "POKEDEX_BASE_URL";
pub const TIMEOUT_VAR: &str = "POKEDEX_TIMEOUT_SECS";
pub const DEGRADE_POLICY_VAR: &str = "POKEDEX_DEGRADE_POLICY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be \"silent\" or \"surface\", got {value:?}")]
    InvalidPolicy { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub degrade_policy: DegradePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            degrade_policy: DegradePolicy::Silent,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BASE_URL_VAR) {
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_VAR });
            }
            config.base_url = value.to_string();
        }

        if let Some(value) = lookup(TIMEOUT_VAR) {
            config.timeout = match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(DEGRADE_POLICY_VAR) {
            config.degrade_policy = match value.trim().to_ascii_lowercase().as_str() {
                "silent" => DegradePolicy::Silent,
                "surface" => DegradePolicy::Surface,
                _ => {
                    return Err(ConfigError::InvalidPolicy {
                        var: DEGRADE_POLICY_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}
