use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for Friend-Sift
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the values the public Roblox endpoints expect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

/// Endpoint locations and request shaping
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the friends service (listing and count endpoints)
    #[serde(rename = "friends-base-url")]
    pub friends_base_url: String,

    /// Base URL of the users service (account details)
    #[serde(rename = "users-base-url")]
    pub users_base_url: String,

    /// Base URL used to build profile links
    #[serde(rename = "profile-base-url")]
    pub profile_base_url: String,

    /// Number of friends requested per listing page
    #[serde(rename = "page-size")]
    pub page_size: u32,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            friends_base_url: "https://friends.roblox.com".to_string(),
            users_base_url: "https://users.roblox.com".to_string(),
            profile_base_url: "https://www.roblox.com".to_string(),
            page_size: 100,
            timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: "friend-sift".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Backoff configuration for rate-limited and failed requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay before the first retry, doubled on each subsequent one (milliseconds)
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Upper bound of the random jitter added to status-code retries (milliseconds)
    #[serde(rename = "max-jitter-ms")]
    pub max_jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 6,
            base_delay_ms: 500,
            max_jitter_ms: 200,
        }
    }
}

/// Fixed pauses that keep the request rate low
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause between listing pages (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Pause after each checked friend (milliseconds)
    #[serde(rename = "candidate-delay-ms")]
    pub candidate_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 200,
            candidate_delay_ms: 150,
        }
    }
}

impl PacingConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn candidate_delay(&self) -> Duration {
        Duration::from_millis(self.candidate_delay_ms)
    }
}

/// The two user-tunable filter values, persisted between runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Friends at or above this friend count are dropped
    pub threshold: u64,

    /// Accounts older than this many years are dropped (0 disables the check)
    #[serde(rename = "max-age")]
    pub max_age: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: 3,
            max_age: 0.0,
        }
    }
}
