// Search and ranking engine.
// Submodules (files under `src/algorithm`)
pub mod combinations;
pub mod conflict;
pub mod filters;
pub mod planner;
pub mod ranking;

// Public engine API
pub use combinations::{
    DEFAULT_MAX_COMBINATIONS, enumerate_combinations, enumerate_combinations_with_preferences,
    group_by_course,
};
pub use conflict::{conflicts, slots};
pub use filters::{HardFilters, TimeRules};
pub use planner::plan;
pub use ranking::{EMPTY_COMBINATION_SCORE, rank, rank_scored, score};
