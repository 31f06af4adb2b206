//! Friend-Sift main entry point
//!
//! This is the command-line interface for the Friend-Sift friends-list scanner.

use anyhow::{bail, Context};
use clap::Parser;
use friend_sift::config::{load_config, load_settings, save_settings, Config, Settings};
use friend_sift::output::{
    export_results, FileTarget, ScanObserver, StdoutTarget, TerminalObserver,
};
use friend_sift::scan::{ScanOptions, ScanSummary, Scanner};
use friend_sift::subject::{parse_manual_id, PageContext, ProfilePageDetector, SubjectDetector};
use friend_sift::UserId;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Friend-Sift: a polite friends-list sifter
///
/// Lists every friend of a Roblox user, looks up each friend's own friend
/// count and account age, and prints the friends that stay under the limits.
#[derive(Parser, Debug)]
#[command(name = "friend-sift")]
#[command(version)]
#[command(about = "Scan a Roblox user's friends for small or new accounts", long_about = None)]
struct Cli {
    /// Numeric user ID of the subject
    #[arg(value_name = "USER_ID", required_unless_present = "page_url")]
    user_id: Option<String>,

    /// Profile page URL to detect the subject from (.../users/<id>/profile)
    #[arg(long, value_name = "URL", conflicts_with = "user_id")]
    page_url: Option<String>,

    /// Drop friends with at least this many friends (saved for next time)
    #[arg(short, long)]
    threshold: Option<u64>,

    /// Drop accounts older than this many years, 0 to disable (saved for next time)
    #[arg(short = 'a', long, value_name = "YEARS")]
    max_age: Option<f64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Path to the saved settings file
    #[arg(long, value_name = "PATH", default_value = "friend-sift-settings.toml")]
    settings: PathBuf,

    /// Write results as `Name: Id (ProfileUrl),` lines to a file, or `-` for stdout
    #[arg(short, long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress status and non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // The subject is resolved before any network traffic
    let subject = resolve_subject(&cli)?;

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let settings = update_settings(&cli.settings, cli.threshold, cli.max_age)?;
    let options = ScanOptions::from(&settings);

    let scanner = Scanner::new(&config).context("Failed to set up HTTP client")?;
    let mut observer = TerminalObserver::new(scanner.client().endpoints().clone(), cli.quiet);

    let Some(summary) = run_scan(&scanner, subject, options, &mut observer).await else {
        return Ok(ExitCode::FAILURE);
    };
    tracing::info!(
        "{} of {} friends qualified",
        summary.results.len(),
        summary.friends_listed
    );

    if let Some(path) = &cli.export {
        let endpoints = scanner.client().endpoints();
        let exported = if path == Path::new("-") {
            export_results(observer.results(), endpoints, &mut StdoutTarget)
        } else {
            export_results(observer.results(), endpoints, &mut FileTarget::new(path))
        };
        let outcome = exported
            .with_context(|| format!("Failed to export results to {}", path.display()))?;

        if !cli.quiet {
            eprintln!("{}", outcome.notice());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Runs one scan, returning `None` if the listing could not be fetched
///
/// The failure has already been shown as an `Error:` status and logged by
/// the scanner, so it is not reported again here.
async fn run_scan<O>(
    scanner: &Scanner,
    subject: UserId,
    options: ScanOptions,
    observer: &mut O,
) -> Option<ScanSummary>
where
    O: ScanObserver + ?Sized,
{
    match scanner.scan(subject, options, observer).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::debug!("Scan aborted: {}", e);
            None
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("friend_sift=info,warn"),
            1 => EnvFilter::new("friend_sift=debug,info"),
            2 => EnvFilter::new("friend_sift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves the scan subject from manual input or a profile page URL
fn resolve_subject(cli: &Cli) -> anyhow::Result<UserId> {
    if let Some(page_url) = &cli.page_url {
        let page = PageContext::from_url(page_url.as_str());
        return match ProfilePageDetector.detect_subject_id(&page) {
            Some(id) => Ok(id),
            None => bail!("No Roblox user detected on the given page."),
        };
    }

    let input = cli.user_id.as_deref().unwrap_or_default();
    Ok(parse_manual_id(input)?)
}

/// Loads saved settings, applies command-line overrides, and saves them if changed
fn update_settings(
    path: &Path,
    threshold: Option<u64>,
    max_age: Option<f64>,
) -> anyhow::Result<Settings> {
    let saved = load_settings(path)
        .with_context(|| format!("Failed to load settings {}", path.display()))?;

    let settings = Settings {
        threshold: threshold.unwrap_or(saved.threshold),
        max_age: max_age.unwrap_or(saved.max_age),
    };

    if settings != saved {
        save_settings(path, &settings)
            .with_context(|| format!("Failed to save settings {}", path.display()))?;
        tracing::debug!("Saved settings to {}", path.display());
    }

    Ok(settings)
}
