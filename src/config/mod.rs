//! Configuration module for Friend-Sift
//!
//! This module handles two files:
//! - the optional TOML configuration (endpoints, retry policy, pacing)
//! - the settings file holding the two filter values between runs
//!
//! # Example
//!
//! ```no_run
//! use friend_sift::config::{load_config, load_settings};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("friend-sift.toml")).unwrap();
//! let settings = load_settings(Path::new("friend-sift-settings.toml")).unwrap();
//! println!("Threshold {} against {}", settings.threshold, config.api.friends_base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, PacingConfig, RetryConfig, Settings, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_settings, parse_config, save_settings};
