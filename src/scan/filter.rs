//! Qualification rules
//!
//! The rules are evaluated in a fixed order:
//! 1. A known friend count at or above the threshold rejects immediately,
//!    before any age lookup.
//! 2. With age filtering on, an account older than the limit, or one whose
//!    age could not be looked up, is rejected.
//! 3. An unknown friend count is rejected when the threshold is positive.
//!
//! A failed count lookup is tolerated under threshold 0 but a failed age
//! lookup never is.

use crate::scan::types::ScanOptions;
use chrono::{DateTime, Utc};

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.25;

/// Outcome of the account age lookup for one friend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgeLookup {
    /// Age filtering is off, nothing was fetched
    NotRequested,
    /// Account age in years
    Known(f64),
    /// The lookup failed
    Unavailable,
}

impl AgeLookup {
    pub fn years(&self) -> Option<f64> {
        match self {
            Self::Known(years) => Some(*years),
            _ => None,
        }
    }
}

/// Why a friend was kept or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Qualifies,
    /// Known friend count at or above the threshold
    TooManyFriends,
    /// Account older than the age limit
    TooOld,
    /// Age filtering is on but the age is unknown
    AgeUnavailable,
    /// Friend count unknown while the threshold is positive
    UnknownCount,
}

impl Verdict {
    pub fn qualifies(&self) -> bool {
        matches!(self, Self::Qualifies)
    }
}

/// Returns true if a known friend count rules the friend out
///
/// Checked before the age lookup so rejected friends cost no extra request.
pub fn exceeds_threshold(friend_count: Option<u64>, options: &ScanOptions) -> bool {
    matches!(friend_count, Some(count) if count >= options.threshold)
}

/// Decides whether a friend qualifies
///
/// Pure: the same inputs always give the same verdict.
pub fn decide(friend_count: Option<u64>, age: AgeLookup, options: &ScanOptions) -> Verdict {
    if exceeds_threshold(friend_count, options) {
        return Verdict::TooManyFriends;
    }

    let mut verdict = Verdict::Qualifies;

    if options.age_filter_enabled() {
        match age {
            AgeLookup::Known(years) if years > options.max_age_years => verdict = Verdict::TooOld,
            AgeLookup::Known(_) => {}
            AgeLookup::NotRequested | AgeLookup::Unavailable => verdict = Verdict::AgeUnavailable,
        }
    }

    if friend_count.is_none() && options.threshold > 0 && verdict.qualifies() {
        verdict = Verdict::UnknownCount;
    }

    verdict
}

/// Account age in years of 365.25 days
pub fn age_in_years(created: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - created).num_milliseconds() as f64 / MILLIS_PER_YEAR
}
