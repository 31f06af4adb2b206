//! Scan module - the enrichment and filter pipeline
//!
//! This module contains:
//! - The data model (candidates, enriched results, scan options)
//! - The qualification rules
//! - The sequential scan engine

mod engine;
pub mod filter;
mod results;
mod types;

pub use engine::Scanner;
pub use filter::{decide, AgeLookup, Verdict};
pub use results::{ScanResults, ScanSummary};
pub use types::{Candidate, EnrichedCandidate, ScanOptions};
