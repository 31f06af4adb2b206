use crate::config::Settings;
use crate::UserId;
use serde::Deserialize;

/// One friend as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    /// Platform-assigned user id
    pub id: UserId,

    /// Account name
    pub name: String,
}

impl Candidate {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A friend that passed the filters, with whatever attributes were looked up
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandidate {
    pub candidate: Candidate,

    /// The friend's own friend count; `None` when the lookup failed
    pub friend_count: Option<u64>,

    /// Account age in years; only present when age filtering ran and succeeded
    pub age_years: Option<f64>,
}

impl EnrichedCandidate {
    pub fn id(&self) -> UserId {
        self.candidate.id
    }

    pub fn name(&self) -> &str {
        &self.candidate.name
    }
}

/// Filter parameters for one scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOptions {
    /// Friends whose known friend count is at or above this are dropped
    pub threshold: u64,

    /// Accounts older than this are dropped; 0 disables age filtering
    pub max_age_years: f64,
}

impl ScanOptions {
    pub fn new(threshold: u64, max_age_years: f64) -> Self {
        Self {
            threshold,
            max_age_years,
        }
    }

    /// Returns true if account ages must be looked up
    pub fn age_filter_enabled(&self) -> bool {
        self.max_age_years > 0.0
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ScanOptions {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.threshold, settings.max_age)
    }
}
