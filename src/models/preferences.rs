//! Structured user preferences and scoring weights.
//!
//! Every preference is optional: `None` means "no opinion", which is kept
//! apart from an explicit `Some(false)` or an empty list.

use serde::{Deserialize, Serialize};

/// Preferences extracted from the user's request.
///
/// # Example JSON
/// ```json
/// {
///   "no_class_days": ["금"],
///   "avoid_morning": true,
///   "target_credits": 18,
///   "no_consecutive_classes": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Weekdays the user wants free, e.g. `["금"]` or `["금요일", "월"]`.
    #[serde(default)]
    pub no_class_days: Option<Vec<String>>,
    /// Specific periods that must stay free.
    #[serde(default)]
    pub avoid_periods: Option<Vec<u8>>,
    #[serde(default)]
    pub avoid_morning: Option<bool>,
    #[serde(default)]
    pub avoid_afternoon: Option<bool>,
    /// Treated as "afternoon-free".
    #[serde(default)]
    pub prefer_morning: Option<bool>,
    /// Treated as "morning-free".
    #[serde(default)]
    pub prefer_afternoon: Option<bool>,
    #[serde(default)]
    pub no_consecutive_classes: Option<bool>,
    /// Keep periods 4 and 5 from both being occupied on the same day.
    #[serde(default)]
    pub prefer_empty_lunch: Option<bool>,
    #[serde(default)]
    pub target_credits: Option<u32>,
    /// Section ids every returned combination has to contain.
    #[serde(default)]
    pub must_include: Option<Vec<u32>>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field carries a value. A preference parser that did not
    /// understand its input returns such a record.
    pub fn is_unspecified(&self) -> bool {
        *self == Self::default()
    }

    /// Weekday indices (0 = Monday) of the requested free days. Names that
    /// do not resolve to a weekday are dropped.
    pub fn off_days(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self
            .no_class_days
            .iter()
            .flatten()
            .filter_map(|d| weekday_index(d))
            .collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    pub fn avoided_periods(&self) -> &[u8] {
        self.avoid_periods.as_deref().unwrap_or(&[])
    }

    pub fn required_sections(&self) -> &[u32] {
        self.must_include.as_deref().unwrap_or(&[])
    }

    pub fn avoids_morning(&self) -> bool {
        self.avoid_morning.unwrap_or(false)
    }

    pub fn avoids_afternoon(&self) -> bool {
        self.avoid_afternoon.unwrap_or(false)
    }

    pub fn prefers_morning(&self) -> bool {
        self.prefer_morning.unwrap_or(false)
    }

    pub fn prefers_afternoon(&self) -> bool {
        self.prefer_afternoon.unwrap_or(false)
    }

    pub fn avoids_consecutive(&self) -> bool {
        self.no_consecutive_classes.unwrap_or(false)
    }

    pub fn protects_lunch(&self) -> bool {
        self.prefer_empty_lunch.unwrap_or(false)
    }

    pub fn with_no_class_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_class_days = Some(days.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_target_credits(mut self, credits: u32) -> Self {
        self.target_credits = Some(credits);
        self
    }
}

/// Resolves a weekday name to its index (0 = Monday .. 4 = Friday).
///
/// Accepts the Korean single-character names with or without the `요일`
/// suffix (`"금"`, `"금요일"`) and English names or their usual
/// abbreviations in any case.
pub fn weekday_index(name: &str) -> Option<u8> {
    let trimmed = name.trim();
    let base = trimmed.strip_suffix("요일").unwrap_or(trimmed);
    match base {
        "월" => return Some(0),
        "화" => return Some(1),
        "수" => return Some(2),
        "목" => return Some(3),
        "금" => return Some(4),
        _ => {}
    }
    match base.to_lowercase().as_str() {
        "mon" | "monday" => Some(0),
        "tue" | "tues" | "tuesday" => Some(1),
        "wed" | "wednesday" => Some(2),
        "thu" | "thur" | "thurs" | "thursday" => Some(3),
        "fri" | "friday" => Some(4),
        _ => None,
    }
}

/// Coefficients of the ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points per credit when no credit target is given.
    pub maximize_credits: f64,
    /// Combinations above this many credits are dropped.
    pub credit_limit: u32,
    /// Penalty per occupied morning slot.
    pub fewer_morning_classes: f64,
    /// Bonus per weekday left free.
    pub more_empty_days: f64,
    /// Kept for configuration compatibility; the consecutive-class penalty
    /// is scaled by `user_preference_multiplier`.
    pub no_consecutive_classes: f64,
    /// Scale applied to explicit user preferences.
    pub user_preference_multiplier: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            maximize_credits: 50.0,
            credit_limit: 23,
            fewer_morning_classes: 5.0,
            more_empty_days: 10.0,
            no_consecutive_classes: 2.0,
            user_preference_multiplier: 100.0,
        }
    }
}
