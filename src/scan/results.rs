use crate::scan::types::EnrichedCandidate;
use crate::UserId;

/// Ordered, append-only list of qualifying friends for the current scan
///
/// Entries keep the order in which the listing returned them. The list is
/// cleared when a new scan starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResults {
    entries: Vec<EnrichedCandidate>,
}

impl ScanResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, entry: EnrichedCandidate) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnrichedCandidate> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[EnrichedCandidate] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.entries.iter().map(EnrichedCandidate::id).collect()
    }
}

/// What a finished scan produced
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    /// The user whose friends were scanned
    pub subject: UserId,

    /// Friends returned by the listing
    pub friends_listed: usize,

    /// Friends that qualified, in listing order
    pub results: ScanResults,
}
