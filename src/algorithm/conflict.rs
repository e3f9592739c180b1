// Time-slot resolution and conflict detection between sections.
use std::collections::BTreeSet;
use crate::models::{Section, Slot};

fn day_from_char(c: char) -> Option<u8> {
    match c {
        '월' => Some(0),
        '화' => Some(1),
        '수' => Some(2),
        '목' => Some(3),
        '금' => Some(4),
        _ => None,
    }
}

/// Resolve a raw schedule string into its set of (day, period) slots.
///
/// Format: `D[p,p,...]/room` entries separated by commas, e.g.
/// `"월[1,2]/37-나602,수[8,9]/39-B126"` -> {(0,1),(0,2),(2,8),(2,9)}.
/// Every `D[...]` group in the string is picked up; anything else is
/// ignored. `None`, empty or unparseable input gives an empty set.
pub fn slots(raw: Option<&str>) -> BTreeSet<Slot> {
    let mut out = BTreeSet::new();
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return out,
    };

    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let day = match day_from_char(chars[i]) {
            Some(d) if chars.get(i + 1) == Some(&'[') => d,
            _ => { i += 1; continue; }
        };
        // find the closing bracket of this group
        let start = i + 2;
        let end = match chars[start..].iter().position(|&c| c == ']') {
            Some(off) => start + off,
            None => break,
        };
        let inner: String = chars[start..end].iter().collect();
        // a group must be digits and commas only
        if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit() || c == ',') {
            for p in inner.split(',').filter(|p| !p.is_empty()) {
                if let Ok(period) = p.parse::<u8>() {
                    out.insert(Slot::new(day, period));
                }
            }
        }
        i = end + 1;
    }
    out
}

/// True if the two sections share at least one slot.
///
/// Sections without slots (unresolvable schedules) never conflict.
pub fn conflicts(a: &Section, b: &Section) -> bool {
    // iterate the smaller set
    let (small, large) = if a.slots.len() <= b.slots.len() { (&a.slots, &b.slots) } else { (&b.slots, &a.slots) };
    small.iter().any(|s| large.contains(s))
}

/// True if `candidate` conflicts with any section already chosen.
pub fn conflicts_with_any(candidate: &Section, chosen: &[&Section]) -> bool {
    chosen.iter().any(|c| conflicts(c, candidate))
}
