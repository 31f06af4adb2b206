//! Friend-Sift: a polite friends-list sifter
//!
//! This crate walks a Roblox user's friends list through the public web API,
//! enriches each friend with their own friend count and account age, and keeps
//! the ones that fall under configurable limits. Requests are strictly
//! sequential and paced, with exponential backoff under rate limiting.

pub mod api;
pub mod config;
pub mod output;
pub mod scan;
pub mod subject;

use thiserror::Error;

/// Platform-assigned user identifier
pub type UserId = u64;

/// Main error type for Friend-Sift operations
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unexpected response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration and settings file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Subject identifier input errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a numeric user ID")]
    NotNumeric(String),

    #[error("User ID is out of range: {0}")]
    OutOfRange(String),
}

/// Result type alias for Friend-Sift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, Settings};
pub use scan::{Candidate, EnrichedCandidate, ScanOptions, Scanner};
pub use subject::{detect_subject_id, parse_manual_id};
