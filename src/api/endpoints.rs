//! Endpoint URL construction
//!
//! Base URLs come from configuration so the same code can target the public
//! Roblox services or a local mock server.

use crate::config::ApiConfig;
use crate::{ConfigError, UserId};
use url::Url;

/// Parsed base URLs for every service the scanner talks to
#[derive(Debug, Clone)]
pub struct Endpoints {
    friends: Url,
    users: Url,
    profile: Url,
}

impl Endpoints {
    /// Parses the configured base URLs
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            friends: parse_base(&config.friends_base_url)?,
            users: parse_base(&config.users_base_url)?,
            profile: parse_base(&config.profile_base_url)?,
        })
    }

    /// `GET {friends}/v1/users/{id}/friends?limit={limit}&cursor={cursor}`
    pub fn friends_page(&self, user_id: UserId, limit: u32, cursor: Option<&str>) -> Url {
        let mut url = with_path(&self.friends, &format!("v1/users/{}/friends", user_id));
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("cursor", cursor);
            }
        }
        url
    }

    /// `GET {friends}/v1/users/{id}/friends/count`
    pub fn friend_count(&self, user_id: UserId) -> Url {
        with_path(&self.friends, &format!("v1/users/{}/friends/count", user_id))
    }

    /// `GET {users}/v1/users/{id}`
    pub fn user_details(&self, user_id: UserId) -> Url {
        with_path(&self.users, &format!("v1/users/{}", user_id))
    }

    /// Public profile page, `{profile}/users/{id}/profile`
    pub fn profile(&self, user_id: UserId) -> Url {
        with_path(&self.profile, &format!("users/{}/profile", user_id))
    }
}

fn parse_base(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", value, e)))
}

/// Appends `path` to the base URL's own path, dropping any query or fragment
fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{}/{}", prefix, path));
    url.set_query(None);
    url.set_fragment(None);
    url
}
