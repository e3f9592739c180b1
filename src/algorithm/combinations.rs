//! Bounded backtracking over course groups.
//!
//! Sections are grouped by course; for every group the search either picks
//! one non-conflicting section or skips the group. Each distinct set of
//! section ids is emitted once, and the search stops as soon as
//! `max_combinations` combinations exist.

use std::collections::HashSet;

use tracing::debug;

use crate::algorithm::conflict::conflicts_with_any;
use crate::algorithm::filters::TimeRules;
use crate::models::{Combination, Section, Signature, UserPreferences};

/// Default cap on the number of combinations an enumeration returns.
pub const DEFAULT_MAX_COMBINATIONS: usize = 10_000;

/// Group sections by `course_id`, keeping first-seen order of groups and of
/// sections inside each group.
pub fn group_by_course(sections: &[Section]) -> Vec<Vec<&Section>> {
    let mut groups: Vec<Vec<&Section>> = Vec::new();
    let mut index: Vec<&str> = Vec::new();
    for s in sections {
        match index.iter().position(|c| *c == s.course_id) {
            Some(i) => groups[i].push(s),
            None => {
                index.push(&s.course_id);
                groups.push(vec![s]);
            }
        }
    }
    groups
}

/// All conflict-free combinations (at most one section per course),
/// deduplicated by signature and capped at `max_combinations`.
pub fn enumerate_combinations(sections: &[Section], max_combinations: usize) -> Vec<Combination<'_>> {
    search(sections, max_combinations, |_| true)
}

/// Like [`enumerate_combinations`], but sections violating a hard
/// time-of-day or day-off preference are never placed in the tree.
pub fn enumerate_combinations_with_preferences<'a>(
    sections: &'a [Section],
    preferences: &UserPreferences,
    max_combinations: usize,
) -> Vec<Combination<'a>> {
    let rules = TimeRules::from_preferences(preferences);
    search(sections, max_combinations, |s| rules.admits(s))
}

/// Per-call search state. The signature set and output list are the only
/// state shared across branches.
struct Search<'a, F> {
    groups: Vec<Vec<&'a Section>>,
    admit: F,
    max: usize,
    suppress_singletons: bool,
    seen: HashSet<Signature>,
    found: Vec<Combination<'a>>,
}

impl<'a, F> Search<'a, F>
where
    F: Fn(&Section) -> bool,
{
    fn full(&self) -> bool {
        self.found.len() >= self.max
    }

    fn backtrack(&mut self, group_index: usize, path: &mut Vec<&'a Section>) {
        if self.full() {
            return;
        }

        if group_index == self.groups.len() {
            self.emit(path);
            return;
        }

        // 1. take one section of this group
        for k in 0..self.groups[group_index].len() {
            // re-check inside the loop so a single wide group cannot overshoot
            if self.full() {
                return;
            }
            let candidate = self.groups[group_index][k];
            if !(self.admit)(candidate) {
                continue;
            }
            if conflicts_with_any(candidate, path) {
                continue;
            }
            path.push(candidate);
            self.backtrack(group_index + 1, path);
            path.pop();
        }

        // 2. skip this group
        self.backtrack(group_index + 1, path);
    }

    fn emit(&mut self, path: &[&'a Section]) {
        if path.is_empty() {
            return;
        }
        if self.suppress_singletons && path.len() == 1 {
            return;
        }
        let signature: Signature = path.iter().map(|s| s.id).collect();
        if self.seen.insert(signature) {
            self.found.push(Combination::new(path.to_vec()));
        }
    }
}

fn search<'a, F>(sections: &'a [Section], max_combinations: usize, admit: F) -> Vec<Combination<'a>>
where
    F: Fn(&Section) -> bool,
{
    if sections.is_empty() || max_combinations == 0 {
        return Vec::new();
    }

    let groups = group_by_course(sections);
    // singletons are only interesting when no richer combination is possible
    let suppress_singletons = groups.len() > 1 && sections.len() > 1;
    debug!(
        "[combinations] {} sections in {} course groups, cap {}",
        sections.len(),
        groups.len(),
        max_combinations
    );

    let mut state = Search {
        groups,
        admit,
        max: max_combinations,
        suppress_singletons,
        seen: HashSet::new(),
        found: Vec::new(),
    };
    let mut path: Vec<&Section> = Vec::new();
    state.backtrack(0, &mut path);

    debug!("[combinations] {} combinations found", state.found.len());
    state.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn sec(id: u32, course: &str, slots: &[(u8, u8)]) -> Section {
        Section::new(id, course, 3, slots.iter().map(|&(d, p)| Slot::new(d, p)))
    }

    fn ids(c: &Combination) -> Vec<u32> {
        c.signature().into_iter().collect()
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let pool = vec![sec(1, "B", &[]), sec(2, "A", &[]), sec(3, "B", &[])];
        let groups = group_by_course(&pool);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(groups[1][0].id, 2);
    }

    #[test]
    fn test_discovery_order_takes_before_skipping() {
        let pool = vec![sec(1, "X", &[(0, 1)]), sec(2, "Y", &[(1, 1)])];
        let found = enumerate_combinations(&pool, DEFAULT_MAX_COMBINATIONS);
        // {1,2} first; singletons suppressed for a multi-course pool
        assert_eq!(found.len(), 1);
        assert_eq!(ids(&found[0]), vec![1, 2]);
    }

    #[test]
    fn test_single_course_yields_each_section() {
        let pool = vec![sec(1, "X", &[(0, 1)]), sec(2, "X", &[(0, 1)]), sec(3, "X", &[(1, 1)])];
        let found = enumerate_combinations(&pool, DEFAULT_MAX_COMBINATIONS);
        assert_eq!(found.iter().map(ids).collect::<Vec<_>>(), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_single_section() {
        let pool = vec![sec(7, "X", &[(0, 1)])];
        let found = enumerate_combinations(&pool, DEFAULT_MAX_COMBINATIONS);
        assert_eq!(found.len(), 1);
        assert_eq!(ids(&found[0]), vec![7]);
    }

    #[test]
    fn test_cap_inside_a_wide_group() {
        let pool: Vec<Section> = (0..50).map(|i| sec(i, "X", &[(0, 1)])).collect();
        let found = enumerate_combinations(&pool, 5);
        assert_eq!(found.len(), 5);
        assert_eq!(found.iter().map(|c| ids(c)[0]).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_cap_and_empty_pool() {
        let pool = vec![sec(1, "X", &[(0, 1)])];
        assert!(enumerate_combinations(&pool, 0).is_empty());
        assert!(enumerate_combinations(&[], 10).is_empty());
    }

    #[test]
    fn test_pruned_mode_drops_sections() {
        let pool = vec![
            sec(1, "X", &[(0, 1)]),
            sec(2, "X", &[(4, 1)]),
            sec(3, "Y", &[(1, 6)]),
            sec(4, "Y", &[(4, 6)]),
        ];
        let prefs = UserPreferences::new().with_no_class_days(["금"]);
        let found = enumerate_combinations_with_preferences(&pool, &prefs, DEFAULT_MAX_COMBINATIONS);
        assert_eq!(found.iter().map(ids).collect::<Vec<_>>(), vec![vec![1, 3]]);
    }
}
