//! Subject identifier handling
//!
//! The subject of a scan comes either from a profile page
//! (`.../users/<id>/profile`) or from manual input, which must be numeric.

use crate::{UserId, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Profile page path, compiled once at first use
static PROFILE_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/users/([0-9]+)/profile").expect("PROFILE_PATH_REGEX pattern is valid")
});

/// What is known about the page the user is looking at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Address of the page
    pub url: String,

    /// User id already extracted by the page itself, if any
    pub user_id_hint: Option<String>,
}

impl PageContext {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_id_hint: None,
        }
    }
}

/// Finds the subject of a page
pub trait SubjectDetector {
    /// Returns the user id the page is about, or `None` if it is not a profile
    fn detect_subject_id(&self, page: &PageContext) -> Option<UserId>;
}

/// Detects subjects on Roblox profile pages
///
/// A numeric hint wins over the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilePageDetector;

impl SubjectDetector for ProfilePageDetector {
    fn detect_subject_id(&self, page: &PageContext) -> Option<UserId> {
        page.user_id_hint
            .as_deref()
            .and_then(|hint| parse_manual_id(hint).ok())
            .or_else(|| detect_subject_id(&page.url))
    }
}

/// Extracts the user id from a profile URL matching `/users/<digits>/profile`
///
/// # Examples
///
/// ```
/// use friend_sift::subject::detect_subject_id;
///
/// assert_eq!(detect_subject_id("https://www.roblox.com/users/156/profile"), Some(156));
/// assert_eq!(detect_subject_id("https://www.roblox.com/games/156"), None);
/// ```
pub fn detect_subject_id(page_url: &str) -> Option<UserId> {
    let captures = PROFILE_PATH_REGEX.captures(page_url)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Validates manually entered subject input
///
/// Surrounding whitespace is ignored; anything but ASCII digits is rejected.
pub fn parse_manual_id(input: &str) -> Result<UserId, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotNumeric(input.to_string()));
    }

    trimmed
        .parse()
        .map_err(|_| ValidationError::OutOfRange(trimmed.to_string()))
}
