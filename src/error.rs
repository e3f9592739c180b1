// Errors of data loading, preference parsing and configuration.
// The engine itself never fails; zero timetables is a valid answer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open data source '{path}': {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("data source '{0}' has no readable worksheet")]
    MissingSheet(PathBuf),

    #[error("data source is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("malformed CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure of the natural-language preference service.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("preference service unavailable: {0}")]
    Service(String),

    #[error("malformed preference payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Failure of a whole timetable request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("data source unreadable: {0}")]
    Load(#[from] LoadError),

    #[error("preference parsing failed: {0}")]
    Preferences(#[from] PreferenceError),
}
