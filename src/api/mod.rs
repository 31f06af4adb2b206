//! API module for talking to the Roblox web services
//!
//! This module contains the request side of a scan:
//! - HTTP fetching with retry and backoff
//! - Endpoint URL construction
//! - Cursor-based traversal of the friends listing
//! - Single-resource lookups (friend count, account creation date)

mod client;
mod endpoints;
mod fetcher;
mod pagination;

pub use client::FriendsClient;
pub use endpoints::Endpoints;
pub use fetcher::{build_http_client, is_retryable_status, ResilientFetcher, RetryPolicy};
pub use pagination::FriendsPage;
