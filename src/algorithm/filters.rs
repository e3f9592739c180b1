//! Hard preference predicates shared by the pruned enumerator and the ranker.
//!
//! Both consumers compile `UserPreferences` into the same `TimeRules`, so a
//! section rejected while building the search tree is exactly a section that
//! would make its combination fail the ranker's hard filters.

use crate::models::{Combination, ScoringWeights, Section, Slot, UserPreferences};

/// Time-of-day and day-off rules derived from the user's preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRules {
    /// Weekday indices that must stay free.
    pub off_days: Vec<u8>,
    /// Reject any morning slot (avoid-morning or prefer-afternoon).
    pub forbid_morning: bool,
    /// Reject any afternoon slot (avoid-afternoon or prefer-morning).
    pub forbid_afternoon: bool,
}

impl TimeRules {
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        Self {
            off_days: prefs.off_days(),
            forbid_morning: prefs.avoids_morning() || prefs.prefers_afternoon(),
            forbid_afternoon: prefs.avoids_afternoon() || prefs.prefers_morning(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.off_days.is_empty() && !self.forbid_morning && !self.forbid_afternoon
    }

    pub fn admits_slot(&self, slot: &Slot) -> bool {
        !(self.forbid_morning && slot.is_morning())
            && !(self.forbid_afternoon && slot.is_afternoon())
            && !self.off_days.contains(&slot.day)
    }

    pub fn admits(&self, section: &Section) -> bool {
        section.slots.iter().all(|s| self.admits_slot(s))
    }
}

pub fn has_morning_slot(section: &Section) -> bool {
    section.slots.iter().any(Slot::is_morning)
}

pub fn has_afternoon_slot(section: &Section) -> bool {
    section.slots.iter().any(Slot::is_afternoon)
}

pub fn touches_days(section: &Section, days: &[u8]) -> bool {
    section.slots.iter().any(|s| days.contains(&s.day))
}

pub fn touches_periods(section: &Section, periods: &[u8]) -> bool {
    section.slots.iter().any(|s| periods.contains(&s.period))
}

/// Hard filters of the ranking stage, applied in order:
/// required sections, credit ceiling, day-off list, avoided periods,
/// avoid-morning/afternoon and prefer-morning/afternoon.
#[derive(Debug, Clone)]
pub struct HardFilters<'p> {
    required: &'p [u32],
    credit_limit: u32,
    avoided_periods: &'p [u8],
    rules: TimeRules,
}

impl<'p> HardFilters<'p> {
    pub fn new(prefs: &'p UserPreferences, weights: &ScoringWeights) -> Self {
        Self {
            required: prefs.required_sections(),
            credit_limit: weights.credit_limit,
            avoided_periods: prefs.avoided_periods(),
            rules: TimeRules::from_preferences(prefs),
        }
    }

    pub fn within_credit_limit(&self, combo: &Combination) -> bool {
        combo.total_credits() <= self.credit_limit
    }

    pub fn contains_required(&self, combo: &Combination) -> bool {
        self.required.iter().all(|id| combo.contains(*id))
    }

    pub fn respects_off_days(&self, combo: &Combination) -> bool {
        !combo.sections.iter().any(|s| touches_days(s, &self.rules.off_days))
    }

    pub fn respects_avoided_periods(&self, combo: &Combination) -> bool {
        !combo.sections.iter().any(|s| touches_periods(s, self.avoided_periods))
    }

    pub fn respects_time_of_day(&self, combo: &Combination) -> bool {
        combo.sections.iter().all(|s| {
            !(self.rules.forbid_morning && has_morning_slot(s))
                && !(self.rules.forbid_afternoon && has_afternoon_slot(s))
        })
    }

    /// Apply every enabled filter to `combos`, keeping their order.
    pub fn apply<'a>(&self, combos: Vec<Combination<'a>>) -> Vec<Combination<'a>> {
        let mut resultado = combos;

        if !self.required.is_empty() {
            resultado.retain(|c| self.contains_required(c));
        }

        resultado.retain(|c| self.within_credit_limit(c));

        if !self.rules.off_days.is_empty() {
            resultado.retain(|c| self.respects_off_days(c));
        }

        if !self.avoided_periods.is_empty() {
            resultado.retain(|c| self.respects_avoided_periods(c));
        }

        if self.rules.forbid_morning || self.rules.forbid_afternoon {
            resultado.retain(|c| self.respects_time_of_day(c));
        }

        resultado
    }
}
