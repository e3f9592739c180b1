use quicktable::{Section, Slot, conflicts, slots};

#[test]
fn test_schedule_strings_resolve_to_slots() {
    let s = slots(Some("월[1,2]/37-나602,수[8,9]/39-B126"));
    let expected: Vec<Slot> = vec![Slot::new(0, 1), Slot::new(0, 2), Slot::new(2, 8), Slot::new(2, 9)];
    assert_eq!(s.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_missing_or_unparseable_schedule_is_empty() {
    assert!(slots(None).is_empty());
    assert!(slots(Some("")).is_empty());
    assert!(slots(Some("미정")).is_empty());
}

#[test]
fn test_sections_sharing_a_period_conflict() {
    let a = Section::from_schedule(1, "A", 3, "화[3,4]/01-101");
    let b = Section::from_schedule(2, "B", 3, "화[4,5]/01-102");
    let c = Section::from_schedule(3, "C", 3, "목[3,4]/01-101");
    assert!(conflicts(&a, &b));
    assert!(!conflicts(&a, &c));
    assert!(!conflicts(&b, &c));
}

#[test]
fn test_section_without_slots_never_conflicts() {
    let online = Section::from_schedule(1, "A", 3, "");
    let a = Section::from_schedule(2, "B", 3, "월[1]/01-101");
    assert!(!conflicts(&online, &a));
    assert!(!conflicts(&online, &online));
}
