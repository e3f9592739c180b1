//! Runtime configuration.
//!
//! Loaded from a TOML file, or from environment variables (with `.env`
//! support) when no file is given.
//!
//! ```
//! use quicktable::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     data_path = "data/시간표.csv"
//!     max_combinations = 500
//!
//!     [weights]
//!     credit_limit = 21
//! "#).unwrap();
//!
//! assert_eq!(config.max_combinations, 500);
//! assert_eq!(config.weights.credit_limit, 21);
//! assert_eq!(config.weights.maximize_credits, 50.0);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::DEFAULT_MAX_COMBINATIONS;
use crate::error::ConfigError;
use crate::models::ScoringWeights;

pub const ENV_DATA: &str = "QUICKTABLE_DATA";
pub const ENV_MAX_COMBINATIONS: &str = "QUICKTABLE_MAX_COMBINATIONS";
pub const ENV_CACHE: &str = "QUICKTABLE_CACHE";

const DEFAULT_DATA_PATH: &str = "data/시간표.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV file or workbook holding the section table.
    pub data_path: PathBuf,
    /// Cap for each enumeration pass.
    pub max_combinations: usize,
    /// Optional JSON file backing the preference cache.
    pub cache_path: Option<PathBuf>,
    pub weights: ScoringWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            cache_path: None,
            weights: ScoringWeights::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Defaults overridden by `QUICKTABLE_*` variables; `.env` is loaded
    /// first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = lookup(ENV_DATA) {
            self.data_path = PathBuf::from(p);
        }
        if let Some(v) = lookup(ENV_MAX_COMBINATIONS) {
            self.max_combinations = v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_MAX_COMBINATIONS,
                value: v.clone(),
            })?;
        }
        if let Some(p) = lookup(ENV_CACHE) {
            self.cache_path = Some(PathBuf::from(p));
        }
        Ok(self)
    }
}
