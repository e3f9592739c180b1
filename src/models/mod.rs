// Core data structures: sections, slots and combinations.
mod preferences;

pub use preferences::{ScoringWeights, UserPreferences, weekday_index};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Last period counted as morning (periods 1-4).
pub const LAST_MORNING_PERIOD: u8 = 4;

/// Number of teaching days in a week (Mon..Fri).
pub const WEEKDAYS: u8 = 5;

/// One occupied (day, period) unit. `day` is 0 = Monday .. 4 = Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub day: u8,
    pub period: u8,
}

impl Slot {
    pub fn new(day: u8, period: u8) -> Self {
        Self { day, period }
    }

    #[inline]
    pub fn is_morning(&self) -> bool {
        self.period <= LAST_MORNING_PERIOD
    }

    #[inline]
    pub fn is_afternoon(&self) -> bool {
        self.period > LAST_MORNING_PERIOD
    }
}

/// A schedulable offering of a course, as loaded from the data source.
///
/// Only `id`, `course_id`, `credits` and `slots` take part in the search;
/// the remaining columns are carried through for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub course_id: String,
    pub credits: u32,
    pub slots: BTreeSet<Slot>,
    #[serde(default)]
    pub class_section: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub course_type: String,
    #[serde(default)]
    pub detailed_area: String,
    #[serde(default)]
    pub raw_schedule: Option<String>,
}

impl Section {
    pub fn new(
        id: u32,
        course_id: impl Into<String>,
        credits: u32,
        slots: impl IntoIterator<Item = Slot>,
    ) -> Self {
        Self {
            id,
            course_id: course_id.into(),
            credits,
            slots: slots.into_iter().collect(),
            class_section: String::new(),
            name: String::new(),
            grade: String::new(),
            department: String::new(),
            course_type: String::new(),
            detailed_area: String::new(),
            raw_schedule: None,
        }
    }

    /// Builds a section whose slots are resolved from a raw schedule string
    /// such as `"월[1,2]/37-나602"`.
    pub fn from_schedule(id: u32, course_id: impl Into<String>, credits: u32, raw: &str) -> Self {
        let mut s = Self::new(id, course_id, credits, crate::algorithm::slots(Some(raw)));
        s.raw_schedule = Some(raw.to_string());
        s
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Set of section ids identifying a combination.
pub type Signature = BTreeSet<u32>;

/// A conflict-free selection of sections with at most one per course.
///
/// Borrowed from the caller's pool; equality is by signature, so member
/// order does not matter.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Combination<'a> {
    pub sections: Vec<&'a Section>,
}

impl<'a> Combination<'a> {
    pub fn new(sections: Vec<&'a Section>) -> Self {
        Self { sections }
    }

    pub fn signature(&self) -> Signature {
        self.sections.iter().map(|s| s.id).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, section_id: u32) -> bool {
        self.sections.iter().any(|s| s.id == section_id)
    }

    pub fn total_credits(&self) -> u32 {
        self.sections.iter().map(|s| s.credits).sum()
    }

    /// Every occupied slot paired with the id of the section holding it.
    pub fn slots(&self) -> impl Iterator<Item = (u32, Slot)> + '_ {
        self.sections
            .iter()
            .flat_map(|s| s.slots.iter().map(move |slot| (s.id, *slot)))
    }

    pub fn days_used(&self) -> BTreeSet<u8> {
        self.slots().map(|(_, slot)| slot.day).collect()
    }

    pub fn section_ids(&self) -> HashSet<u32> {
        self.sections.iter().map(|s| s.id).collect()
    }

    /// Owned copies of the member sections, for serialising responses.
    pub fn to_owned_sections(&self) -> Vec<Section> {
        self.sections.iter().map(|s| (*s).clone()).collect()
    }
}

impl PartialEq for Combination<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for Combination<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combination_equality_ignores_order() {
        let a = Section::new(1, "X", 3, [Slot::new(0, 1)]);
        let b = Section::new(2, "Y", 3, [Slot::new(1, 1)]);
        assert_eq!(Combination::new(vec![&a, &b]), Combination::new(vec![&b, &a]));
        assert_ne!(Combination::new(vec![&a]), Combination::new(vec![&a, &b]));
    }

    #[test]
    fn morning_boundary() {
        assert!(Slot::new(0, 4).is_morning());
        assert!(Slot::new(0, 5).is_afternoon());
        assert!(!Slot::new(0, 5).is_morning());
    }

    #[test]
    fn totals_and_days() {
        let a = Section::new(1, "X", 3, [Slot::new(0, 1), Slot::new(2, 1)]);
        let b = Section::new(2, "Y", 2, [Slot::new(2, 3)]);
        let c = Combination::new(vec![&a, &b]);
        assert_eq!(c.total_credits(), 5);
        assert_eq!(c.days_used().into_iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(c.slots().count(), 3);
    }
}
