//! Typed access to the Roblox friends and users endpoints
//!
//! Every request goes through the [`ResilientFetcher`], so all of them share
//! the same retry and backoff behaviour.

use crate::api::endpoints::Endpoints;
use crate::api::fetcher::{build_http_client, ResilientFetcher, RetryPolicy};
use crate::api::pagination::FriendsPage;
use crate::config::Config;
use crate::scan::Candidate;
use crate::{SiftError, UserId};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct FriendCountResponse {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct UserDetailsResponse {
    created: DateTime<Utc>,
}

/// Client for the friends listing, friend count and user detail endpoints
#[derive(Debug, Clone)]
pub struct FriendsClient {
    fetcher: ResilientFetcher,
    endpoints: Endpoints,
    page_size: u32,
    page_delay: Duration,
}

impl FriendsClient {
    /// Builds a client from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(FriendsClient)` - Ready to issue requests
    /// * `Err(SiftError)` - Invalid base URLs or the HTTP client failed to build
    pub fn new(config: &Config) -> Result<Self, SiftError> {
        let client = build_http_client(&config.api, &config.user_agent)?;
        let endpoints = Endpoints::from_config(&config.api)?;

        Ok(Self {
            fetcher: ResilientFetcher::new(client, RetryPolicy::from(&config.retry)),
            endpoints,
            page_size: config.api.page_size,
            page_delay: config.pacing.page_delay(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Walks every page of a user's friends listing
    ///
    /// Pages are requested one at a time, following `nextPageCursor` until it
    /// is absent, with a fixed pause between pages. Friends are returned in
    /// API order, page after page.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Candidate>)` - All listed friends
    /// * `Err(SiftError)` - A page failed after retries or was not a JSON object
    pub async fn fetch_all_friends(&self, user_id: UserId) -> Result<Vec<Candidate>, SiftError> {
        let mut cursor: Option<String> = None;
        let mut all = Vec::new();
        let mut pages = 0usize;

        loop {
            let url = self
                .endpoints
                .friends_page(user_id, self.page_size, cursor.as_deref());
            let body: serde_json::Value = self.get_json(&url).await?;
            let page = FriendsPage::from_value(&body).ok_or_else(|| SiftError::Parse {
                url: url.to_string(),
                message: "listing body is not a JSON object".to_string(),
            })?;

            pages += 1;
            tracing::debug!(
                user_id,
                page = pages,
                friends = page.data.len(),
                "Fetched friends page"
            );
            all.extend(page.data);

            match page.next_page_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }

            tokio::time::sleep(self.page_delay).await;
        }

        tracing::info!(user_id, pages, friends = all.len(), "Friends listing complete");
        Ok(all)
    }

    /// Fetches how many friends a user has
    pub async fn fetch_friend_count(&self, user_id: UserId) -> Result<u64, SiftError> {
        let url = self.endpoints.friend_count(user_id);
        let response: FriendCountResponse = self.get_json(&url).await?;
        Ok(response.count)
    }

    /// Fetches the account creation timestamp of a user
    pub async fn fetch_user_created(&self, user_id: UserId) -> Result<DateTime<Utc>, SiftError> {
        let url = self.endpoints.user_details(user_id);
        let response: UserDetailsResponse = self.get_json(&url).await?;
        Ok(response.created)
    }

    /// GETs a URL and decodes a successful JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SiftError> {
        let response = self.fetcher.fetch(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiftError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| SiftError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        serde_json::from_str(&body).map_err(|e| SiftError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
