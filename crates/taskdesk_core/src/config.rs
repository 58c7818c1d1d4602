//! Runtime configuration for the tracker.
//!
//! # Responsibility
//! - Hold the reassignment policy and logging settings.
//! - Load settings from `TASKDESK_*` environment variables.
//!
//! # Invariants
//! - Every field has a default; an empty environment yields
//!   `TrackerConfig::default()`.
//! - Invalid values are reported, never silently replaced by defaults.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_LOG_LEVEL: &str = "TASKDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKDESK_LOG_DIR";
pub const ENV_REASSIGN_POLICY: &str = "TASKDESK_REASSIGN_POLICY";

/// What happens when a task that already has an assignee is assigned to a
/// different user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReassignPolicy {
    /// The task moves to the new user and leaves the previous one.
    #[default]
    Move,
    /// The assignment fails with `AlreadyAssigned`; unassign first. An
    /// assignee that was deleted counts as no assignee.
    Reject,
}

impl ReassignPolicy {
    /// Lowercase name, as accepted by `TASKDESK_REASSIGN_POLICY`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for ReassignPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(Self::Move),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::InvalidValue {
                key: ENV_REASSIGN_POLICY,
                value: other.to_string(),
                expected: "move|reject",
            }),
        }
    }
}

/// Logging settings consumed by `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files. `None` logs to stderr.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub reassign_policy: ReassignPolicy,
    pub log: LogConfig,
}

impl TrackerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = read(ENV_REASSIGN_POLICY) {
            config.reassign_policy = value.parse()?;
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            config.log.level = value.trim().to_string();
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            let dir = PathBuf::from(value.trim());
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_LOG_DIR,
                    value,
                    expected: "an absolute path",
                });
            }
            config.log.dir = Some(dir);
        }

        Ok(config)
    }
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid {key} value `{value}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, ReassignPolicy, TrackerConfig, ENV_LOG_DIR, ENV_LOG_LEVEL,
        ENV_REASSIGN_POLICY,
    };
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = TrackerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.reassign_policy, ReassignPolicy::Move);
    }

    #[test]
    fn reads_all_keys() {
        let dir = std::env::temp_dir().join("taskdesk-config-test");
        let dir_str = dir.to_str().unwrap().to_string();
        let config = TrackerConfig::from_lookup(lookup(&[
            (ENV_REASSIGN_POLICY, "Reject"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, dir_str.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.reassign_policy, ReassignPolicy::Reject);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.dir, Some(dir));
    }

    #[test]
    fn rejects_unknown_policy_and_relative_dir() {
        let err = TrackerConfig::from_lookup(lookup(&[(ENV_REASSIGN_POLICY, "share")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == ENV_REASSIGN_POLICY));

        let err =
            TrackerConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs/dev")])).unwrap_err();
        assert!(err.to_string().contains("absolute path"));
    }
}
