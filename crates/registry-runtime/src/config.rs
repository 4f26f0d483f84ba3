//! # Runtime Configuration
//!
//! Defaults with environment overrides. A malformed override is an error,
//! never silently ignored.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PR_DATA_DIR` | `storage.data_dir` |
//! | `PR_MAX_PROPERTIES` | `service.max_properties` |
//! | `PR_REGISTRATION_FEE` | `service.registration_fee` |
//! | `PR_FEE_SETTLEMENT` | `service.fee_settlement` (`confirmed` / `fire-and-forget`) |
//! | `PR_FLUSH_ON_COMMIT` | `service.flush_on_commit` (`true` / `false`) |

use registry_engine::service::{FeeSettlement, ServiceConfig};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Registry service configuration.
    pub service: ServiceConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding state and ledger files.
    pub data_dir: PathBuf,
    /// State file name inside `data_dir`.
    pub state_file: String,
    /// Fee ledger file name inside `data_dir`.
    pub ledger_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            state_file: "registry.bin".to_string(),
            ledger_file: "fee-ledger.jsonl".to_string(),
        }
    }
}

impl StorageConfig {
    /// Full path of the state file.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.state_file)
    }

    /// Full path of the fee ledger.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unparsable value.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The resulting configuration is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("PR_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(max) = parse_var(&lookup, "PR_MAX_PROPERTIES")? {
            config.service.max_properties = max;
        }
        if let Some(fee) = parse_var(&lookup, "PR_REGISTRATION_FEE")? {
            config.service.registration_fee = fee;
        }
        if let Some(settlement) = parse_var::<FeeSettlement, _>(&lookup, "PR_FEE_SETTLEMENT")? {
            config.service.fee_settlement = settlement;
        }
        if let Some(flush) = parse_var(&lookup, "PR_FLUSH_ON_COMMIT")? {
            config.service.flush_on_commit = flush;
        }

        config.service.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            }),
    }
}
