// Root of the `quicktable` crate.
// Timetable generation: conflict-free section combinations ranked by
// user preferences and scoring weights.
pub mod algorithm;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod preferences;
pub mod service;

pub use algorithm::{
    DEFAULT_MAX_COMBINATIONS, conflicts, enumerate_combinations,
    enumerate_combinations_with_preferences, plan, rank, slots,
};
pub use config::Config;
pub use error::{ConfigError, LoadError, PreferenceError, ServiceError};
pub use models::{Combination, ScoringWeights, Section, Slot, UserPreferences};
