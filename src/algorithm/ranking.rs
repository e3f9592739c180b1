// Scoring and ordering of combinations.

use std::collections::BTreeMap;

use tracing::debug;

use crate::algorithm::filters::HardFilters;
use crate::models::{Combination, ScoringWeights, Slot, UserPreferences, WEEKDAYS};

/// Score given to an empty combination so it always sorts last.
pub const EMPTY_COMBINATION_SCORE: f64 = -9999.0;

const OFF_DAY_VIOLATION: f64 = -5.0;
const OFF_DAY_KEPT: f64 = 1.0;
const CONSECUTIVE_PENALTY: f64 = -10.0;
const LUNCH_PENALTY: f64 = -10.0;

/// Filter, score and sort `combinations` best-first.
pub fn rank<'a>(
    combinations: Vec<Combination<'a>>,
    preferences: &UserPreferences,
    weights: &ScoringWeights,
) -> Vec<Combination<'a>> {
    rank_scored(combinations, preferences, weights)
        .into_iter()
        .map(|(c, _)| c)
        .collect()
}

/// Same as [`rank`], keeping each combination's score.
pub fn rank_scored<'a>(
    combinations: Vec<Combination<'a>>,
    preferences: &UserPreferences,
    weights: &ScoringWeights,
) -> Vec<(Combination<'a>, f64)> {
    let total = combinations.len();
    let survivors = HardFilters::new(preferences, weights).apply(combinations);
    debug!("[rank] {} of {} combinations pass the hard filters", survivors.len(), total);

    let mut scored: Vec<(Combination<'a>, f64)> = survivors
        .into_iter()
        .map(|c| {
            let s = score(&c, preferences, weights);
            (c, s)
        })
        .collect();
    // stable: ties keep enumeration order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}

/// Soft score of a single combination. Hard filters are not applied here.
pub fn score(combo: &Combination, preferences: &UserPreferences, weights: &ScoringWeights) -> f64 {
    if combo.is_empty() {
        return EMPTY_COMBINATION_SCORE;
    }

    let mut score = credit_term(combo.total_credits(), preferences, weights);

    let slots: Vec<(u32, Slot)> = combo.slots().collect();
    let days = combo.days_used();

    if !slots.is_empty() {
        let free_days = f64::from(WEEKDAYS) - days.len() as f64;
        score += free_days * weights.more_empty_days;

        let morning = slots.iter().filter(|(_, s)| s.is_morning()).count() as f64;
        score -= morning * weights.fewer_morning_classes;
    }

    score + preference_term(&slots, preferences) * weights.user_preference_multiplier
}

fn credit_term(total: u32, preferences: &UserPreferences, weights: &ScoringWeights) -> f64 {
    match preferences.target_credits {
        Some(target) => {
            let diff = f64::from(total.abs_diff(target));
            10.0 / (1.0 + diff) * weights.user_preference_multiplier
        }
        None => f64::from(total) * weights.maximize_credits,
    }
}

/// Unscaled contribution of the user's explicit preferences.
fn preference_term(slots: &[(u32, Slot)], preferences: &UserPreferences) -> f64 {
    let mut term = 0.0;

    if preferences.no_class_days.as_ref().is_some_and(|d| !d.is_empty()) {
        let off_days = preferences.off_days();
        let violated = slots.iter().any(|(_, s)| off_days.contains(&s.day));
        term += if violated { OFF_DAY_VIOLATION } else { OFF_DAY_KEPT };
    }

    if preferences.avoids_consecutive() || preferences.protects_lunch() {
        let by_day = slots_by_day(slots);

        if preferences.avoids_consecutive() {
            let pairs: usize = by_day.values().map(|day| consecutive_pairs(day)).sum();
            term += pairs as f64 * CONSECUTIVE_PENALTY;
        }

        if preferences.protects_lunch() {
            let blocked = by_day
                .values()
                .filter(|day| {
                    day.iter().any(|(_, p)| *p == 4) && day.iter().any(|(_, p)| *p == 5)
                })
                .count();
            term += blocked as f64 * LUNCH_PENALTY;
        }
    }

    term
}

/// (section id, period) pairs per day, sorted by period.
fn slots_by_day(slots: &[(u32, Slot)]) -> BTreeMap<u8, Vec<(u32, u8)>> {
    let mut by_day: BTreeMap<u8, Vec<(u32, u8)>> = BTreeMap::new();
    for (id, s) in slots {
        by_day.entry(s.day).or_default().push((*id, s.period));
    }
    for day in by_day.values_mut() {
        day.sort_by_key(|(_, p)| *p);
    }
    by_day
}

/// Adjacent periods held by two different sections.
fn consecutive_pairs(day: &[(u32, u8)]) -> usize {
    day.windows(2)
        .filter(|w| u16::from(w[1].1) == u16::from(w[0].1) + 1 && w[1].0 != w[0].0)
        .count()
}
