//! Scan engine - friends listing, enrichment and filtering
//!
//! A scan runs as one sequential task:
//! - Walk the subject's friends listing to completion
//! - For each friend in listing order, look up their friend count and, when
//!   age filtering is on, their account creation date
//! - Apply the qualification rules and hand qualifying friends to the
//!   observer as soon as each one is decided
//! - Pause between friends to keep the request rate low

use crate::api::FriendsClient;
use crate::config::Config;
use crate::output::ScanObserver;
use crate::scan::filter::{age_in_years, decide, exceeds_threshold, AgeLookup};
use crate::scan::results::{ScanResults, ScanSummary};
use crate::scan::types::{Candidate, EnrichedCandidate, ScanOptions};
use crate::{SiftError, UserId};
use chrono::Utc;
use std::time::Duration;

/// Runs friend scans
///
/// Holds no per-scan state, so one scanner can run any number of scans one
/// after another, each with its own results.
#[derive(Debug, Clone)]
pub struct Scanner {
    client: FriendsClient,
    candidate_delay: Duration,
}

impl Scanner {
    /// Creates a scanner from configuration
    pub fn new(config: &Config) -> Result<Self, SiftError> {
        Ok(Self {
            client: FriendsClient::new(config)?,
            candidate_delay: config.pacing.candidate_delay(),
        })
    }

    pub fn client(&self) -> &FriendsClient {
        &self.client
    }

    /// Scans the friends of `subject`
    ///
    /// Qualifying friends are passed to `observer` one at a time, in listing
    /// order, and also collected into the returned summary. A failure while
    /// walking the listing aborts the scan; a failed lookup for one friend
    /// only affects that friend.
    ///
    /// # Returns
    ///
    /// * `Ok(ScanSummary)` - The scan ran to completion
    /// * `Err(SiftError)` - The friends listing could not be fetched
    pub async fn scan<O>(
        &self,
        subject: UserId,
        options: ScanOptions,
        observer: &mut O,
    ) -> Result<ScanSummary, SiftError>
    where
        O: ScanObserver + ?Sized,
    {
        tracing::info!(
            subject,
            threshold = options.threshold,
            max_age_years = options.max_age_years,
            "Starting scan"
        );
        observer.on_scan_started(subject, &options);
        observer.on_status("Fetching friends...");

        let friends = match self.client.fetch_all_friends(subject).await {
            Ok(friends) => friends,
            Err(e) => {
                tracing::error!("Failed to fetch friends of {}: {}", subject, e);
                observer.on_status(&format!("Error: {}", e));
                return Err(e);
            }
        };

        let total = friends.len();
        observer.on_status(&format!("Found {} friends - checking each...", total));

        let mut results = ScanResults::new();
        for (index, candidate) in friends.into_iter().enumerate() {
            observer.on_status(&format!(
                "Checking {}/{}: {}",
                index + 1,
                total,
                candidate.name
            ));

            if let Some(entry) = self.check_candidate(candidate, &options).await {
                observer.on_result(&entry);
                results.push(entry);
            }

            tokio::time::sleep(self.candidate_delay).await;
        }

        tracing::info!(
            subject,
            checked = total,
            qualified = results.len(),
            "Scan complete"
        );
        observer.on_status("Scan complete");

        Ok(ScanSummary {
            subject,
            friends_listed: total,
            results,
        })
    }

    /// Looks up one friend and applies the qualification rules
    async fn check_candidate(
        &self,
        candidate: Candidate,
        options: &ScanOptions,
    ) -> Option<EnrichedCandidate> {
        let friend_count = match self.client.fetch_friend_count(candidate.id).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Friend count failed for {}: {}", candidate.id, e);
                None
            }
        };

        if exceeds_threshold(friend_count, options) {
            tracing::debug!(id = candidate.id, ?friend_count, "Too many friends");
            return None;
        }

        let age = if options.age_filter_enabled() {
            match self.client.fetch_user_created(candidate.id).await {
                Ok(created) => AgeLookup::Known(age_in_years(created, Utc::now())),
                Err(e) => {
                    tracing::warn!("Failed to get user info for age of {}: {}", candidate.id, e);
                    AgeLookup::Unavailable
                }
            }
        } else {
            AgeLookup::NotRequested
        };

        let verdict = decide(friend_count, age, options);
        if !verdict.qualifies() {
            tracing::debug!(id = candidate.id, ?verdict, "Friend does not qualify");
            return None;
        }

        Some(EnrichedCandidate {
            candidate,
            friend_count,
            age_years: age.years(),
        })
    }
}
