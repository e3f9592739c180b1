use std::collections::HashSet;

use proptest::prelude::*;
use quicktable::algorithm::{enumerate_combinations, enumerate_combinations_with_preferences, rank, score};
use quicktable::{Combination, ScoringWeights, Section, Slot, UserPreferences, conflicts};

fn slot_strategy() -> impl Strategy<Value = Slot> {
    (0u8..5, 1u8..10).prop_map(|(d, p)| Slot::new(d, p))
}

fn section_strategy() -> impl Strategy<Value = (u8, u32, Vec<Slot>)> {
    (0u8..4, 1u32..6, prop::collection::vec(slot_strategy(), 0..4))
}

/// Pools with up to 8 sections over 4 courses; ids are unique.
fn pool_strategy() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec(section_strategy(), 0..8).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (course, credits, slots))| Section::new(i as u32 + 1, format!("C{}", course), credits, slots))
            .collect()
    })
}

fn prefs_strategy() -> impl Strategy<Value = UserPreferences> {
    (
        prop::option::of(prop::sample::subsequence(vec!["월", "화", "수", "목", "금"], 0..3)),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(9u32..22),
    )
        .prop_map(|(days, morning, consecutive, lunch, target)| UserPreferences {
            no_class_days: days.map(|d| d.into_iter().map(String::from).collect()),
            avoid_morning: Some(morning),
            no_consecutive_classes: Some(consecutive),
            prefer_empty_lunch: Some(lunch),
            target_credits: target,
            ..Default::default()
        })
}

fn signatures(combos: &[Combination]) -> Vec<Vec<u32>> {
    combos.iter().map(|c| c.signature().into_iter().collect()).collect()
}

proptest! {
    #[test]
    fn conflict_is_symmetric(a in section_strategy(), b in section_strategy()) {
        let a = Section::new(1, "A", a.1, a.2);
        let b = Section::new(2, "B", b.1, b.2);
        prop_assert_eq!(conflicts(&a, &b), conflicts(&b, &a));
    }

    #[test]
    fn combinations_are_valid(pool in pool_strategy(), max in 0usize..50) {
        let combos = enumerate_combinations(&pool, max);
        prop_assert!(combos.len() <= max);

        let mut seen = HashSet::new();
        for combo in &combos {
            prop_assert!(!combo.is_empty());
            prop_assert!(seen.insert(combo.signature()), "duplicate signature");

            let courses: HashSet<&str> = combo.sections.iter().map(|s| s.course_id.as_str()).collect();
            prop_assert_eq!(courses.len(), combo.len());

            for (i, a) in combo.sections.iter().enumerate() {
                for b in &combo.sections[i + 1..] {
                    prop_assert!(!conflicts(a, b));
                }
            }
        }
    }

    #[test]
    fn pruned_search_only_uses_admitted_sections(pool in pool_strategy(), prefs in prefs_strategy()) {
        let off_days = prefs.off_days();
        for combo in enumerate_combinations_with_preferences(&pool, &prefs, 200) {
            for (_, slot) in combo.slots() {
                prop_assert!(!off_days.contains(&slot.day));
                if prefs.avoid_morning == Some(true) {
                    prop_assert!(!slot.is_morning());
                }
            }
        }
    }

    #[test]
    fn rank_is_sorted_and_idempotent(pool in pool_strategy(), prefs in prefs_strategy()) {
        let weights = ScoringWeights::default();
        let once = rank(enumerate_combinations(&pool, 200), &prefs, &weights);

        let scores: Vec<f64> = once.iter().map(|c| score(c, &prefs, &weights)).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let twice = rank(once.clone(), &prefs, &weights);
        prop_assert_eq!(signatures(&once), signatures(&twice));
    }
}
