// Two-pass timetable planning: unconstrained search first, pruned search as fallback.
use tracing::{debug, info};

use crate::algorithm::combinations::{enumerate_combinations, enumerate_combinations_with_preferences};
use crate::algorithm::filters::TimeRules;
use crate::algorithm::ranking::rank;
use crate::models::{Combination, ScoringWeights, Section, UserPreferences};

/// Enumerate and rank timetables for `sections`.
///
/// The unconstrained search runs first. Only when its ranked result is
/// empty and the preferences carry a hard time rule is the pruned search
/// tried, so pruning can never hide results an unpruned search would find.
pub fn plan<'a>(
    sections: &'a [Section],
    preferences: &UserPreferences,
    weights: &ScoringWeights,
    max_combinations: usize,
) -> Vec<Combination<'a>> {
    let combos = enumerate_combinations(sections, max_combinations);
    let enumerated = combos.len();
    let ranked = rank(combos, preferences, weights);
    debug!("[plan] first pass: {} enumerated, {} ranked", enumerated, ranked.len());

    if !ranked.is_empty() || TimeRules::from_preferences(preferences).is_empty() {
        return ranked;
    }

    let pruned = enumerate_combinations_with_preferences(sections, preferences, max_combinations);
    let enumerated = pruned.len();
    let ranked = rank(pruned, preferences, weights);
    info!("[plan] pruned fallback: {} enumerated, {} ranked", enumerated, ranked.len());
    ranked
}
