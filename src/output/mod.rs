//! Output module for presenting and exporting scan results
//!
//! This module handles:
//! - The observer interface the scan engine reports through
//! - Terminal rendering of status lines and qualifying friends
//! - Plain-text export of results to a file or stdout

mod export;
mod terminal;
mod traits;

pub use export::{export_results, format_export, ExportOutcome, FileTarget, StdoutTarget};
pub use terminal::{CollectingObserver, TerminalObserver};
pub use traits::{ExportTarget, ScanObserver};
