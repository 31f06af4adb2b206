//! Plain-text export of scan results
//!
//! Each qualifying friend becomes one line, `Name: Id (ProfileUrl),`, and
//! lines are joined with newlines. An empty result set writes nothing.

use crate::api::Endpoints;
use crate::output::traits::ExportTarget;
use crate::scan::ScanResults;
use std::io::Write;
use std::path::PathBuf;

/// What an export did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// There was nothing to export; the target was not touched
    Empty,
    /// This many entries were written
    Copied(usize),
}

impl ExportOutcome {
    /// Notice shown to the user after an export
    pub fn notice(&self) -> String {
        match self {
            Self::Empty => "No results to copy".to_string(),
            Self::Copied(count) => format!("Copied {} users", count),
        }
    }
}

/// Formats the results as export text
pub fn format_export(results: &ScanResults, endpoints: &Endpoints) -> String {
    results
        .iter()
        .map(|entry| {
            format!(
                "{}: {} ({}),",
                entry.name(),
                entry.id(),
                endpoints.profile(entry.id())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the results to an export target
///
/// # Returns
///
/// * `Ok(ExportOutcome::Empty)` - No results; nothing was written
/// * `Ok(ExportOutcome::Copied(n))` - `n` lines were written in one write
/// * `Err(io::Error)` - The target rejected the write
pub fn export_results<T>(
    results: &ScanResults,
    endpoints: &Endpoints,
    target: &mut T,
) -> std::io::Result<ExportOutcome>
where
    T: ExportTarget + ?Sized,
{
    if results.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    target.write_text(&format_export(results, endpoints))?;
    Ok(ExportOutcome::Copied(results.len()))
}

/// Writes exports to a file, replacing its contents
#[derive(Debug, Clone)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExportTarget for FileTarget {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, text)
    }
}

/// Writes exports to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTarget;

impl ExportTarget for StdoutTarget {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }
}
