//! Request-level operations used by an API layer.
//!
//! Three outcomes are kept apart: timetables found (`Ok` with entries),
//! legitimately none (`Ok` with an empty list) and a failure while loading
//! data or parsing preferences (`Err`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithm::plan;
use crate::error::ServiceError;
use crate::excel::{load_sections, select_sections};
use crate::models::{ScoringWeights, Section};
use crate::preferences::{PreferenceParser, interpret};

/// Incoming timetable request.
///
/// ```json
/// { "lecture_nos": [12, 13, 40], "user_preference_text": "금요일 공강" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableRequest {
    pub lecture_nos: Vec<u32>,
    #[serde(default)]
    pub user_preference_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableResponse {
    /// Ranked timetables, best first.
    pub timetables: Vec<Vec<Section>>,
    /// False when the preference text was given but not understood.
    pub preferences_understood: bool,
}

/// Every section in the data source.
pub fn list_lectures<P: AsRef<Path>>(path: P) -> Result<Vec<Section>, ServiceError> {
    Ok(load_sections(path)?)
}

/// Build ranked timetables for `request` from the sections in `pool`.
pub fn generate<P: PreferenceParser>(
    request: &TimetableRequest,
    pool: &[Section],
    parser: &P,
    weights: &ScoringWeights,
    max_combinations: usize,
) -> Result<TimetableResponse, ServiceError> {
    let selected = select_sections(pool, &request.lecture_nos);
    let (preferences, understood) = interpret(parser, &request.user_preference_text)?;

    let ranked = plan(&selected, &preferences, weights, max_combinations);
    info!(
        "{} of {} requested sections found, {} timetables",
        selected.len(),
        request.lecture_nos.len(),
        ranked.len()
    );

    Ok(TimetableResponse {
        timetables: ranked.iter().map(|c| c.to_owned_sections()).collect(),
        preferences_understood: understood,
    })
}

/// Load the pool from `data_path`, then [`generate`].
pub fn generate_from_source<D: AsRef<Path>, P: PreferenceParser>(
    data_path: D,
    request: &TimetableRequest,
    parser: &P,
    weights: &ScoringWeights,
    max_combinations: usize,
) -> Result<TimetableResponse, ServiceError> {
    let pool = load_sections(data_path)?;
    generate(request, &pool, parser, weights, max_combinations)
}
