//! Terminal presentation of a running scan
//!
//! Status lines go to stderr so stdout only carries results.

use crate::api::Endpoints;
use crate::output::traits::ScanObserver;
use crate::scan::{EnrichedCandidate, ScanOptions, ScanResults};
use crate::UserId;

/// Prints results as they arrive and keeps them for export
#[derive(Debug, Clone)]
pub struct TerminalObserver {
    endpoints: Endpoints,
    results: ScanResults,
    quiet: bool,
}

impl TerminalObserver {
    /// Creates an observer; `quiet` suppresses status lines
    pub fn new(endpoints: Endpoints, quiet: bool) -> Self {
        Self {
            endpoints,
            results: ScanResults::new(),
            quiet,
        }
    }

    /// Results displayed so far in the current scan
    pub fn results(&self) -> &ScanResults {
        &self.results
    }

    /// Formats one result block
    pub fn format_entry(&self, entry: &EnrichedCandidate) -> String {
        let mut block = format!(
            "{} (#{})  {}",
            entry.name(),
            entry.id(),
            self.endpoints.profile(entry.id())
        );
        if let Some(count) = entry.friend_count {
            block.push_str(&format!("\n    Friends: {}", count));
        }
        if let Some(age) = entry.age_years {
            block.push_str(&format!("\n    Age: {:.2} years", age));
        }
        block
    }
}

impl ScanObserver for TerminalObserver {
    fn on_scan_started(&mut self, subject: UserId, _options: &ScanOptions) {
        self.results.clear();
        tracing::debug!("Cleared results for scan of {}", subject);
    }

    fn on_status(&mut self, status: &str) {
        if !self.quiet {
            eprintln!("{}", status);
        }
    }

    fn on_result(&mut self, entry: &EnrichedCandidate) {
        println!("{}", self.format_entry(entry));
        self.results.push(entry.clone());
    }
}

/// Records everything a scan reports, for callers that render later
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    pub statuses: Vec<String>,
    pub results: ScanResults,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl ScanObserver for CollectingObserver {
    fn on_scan_started(&mut self, _subject: UserId, _options: &ScanOptions) {
        self.statuses.clear();
        self.results.clear();
    }

    fn on_status(&mut self, status: &str) {
        self.statuses.push(status.to_string());
    }

    fn on_result(&mut self, entry: &EnrichedCandidate) {
        self.results.push(entry.clone());
    }
}
