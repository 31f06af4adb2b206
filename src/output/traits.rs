//! Observer and export target traits
//!
//! The scan engine reports progress through a [`ScanObserver`]; exports write
//! through an [`ExportTarget`]. Neither knows how the other side presents or
//! stores anything.

use crate::scan::{EnrichedCandidate, ScanOptions};
use crate::UserId;

/// Receives scan progress as it happens
pub trait ScanObserver {
    /// A new scan is starting; previous results should be discarded
    ///
    /// # Arguments
    ///
    /// * `subject` - The user whose friends are scanned
    /// * `options` - The filter parameters for this scan
    fn on_scan_started(&mut self, subject: UserId, options: &ScanOptions);

    /// Short human-readable progress or error line
    fn on_status(&mut self, status: &str);

    /// A friend qualified; called in listing order
    fn on_result(&mut self, entry: &EnrichedCandidate);
}

/// Destination for exported text, such as a clipboard or a file
pub trait ExportTarget {
    fn write_text(&mut self, text: &str) -> std::io::Result<()>;
}
