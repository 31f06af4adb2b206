//! Listing page decoding
//!
//! The listing endpoint answers `{ data: [{id, name}, ...], nextPageCursor }`.
//! Decoding is lenient about `data`: a missing or non-array field counts as an
//! empty page, and entries without a usable `id`/`name` are skipped.

use crate::scan::Candidate;
use serde_json::Value;

/// One decoded page of the friends listing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FriendsPage {
    /// Friends on this page, in API order
    pub data: Vec<Candidate>,

    /// Cursor for the following page; `None` when this is the last page
    pub next_page_cursor: Option<String>,
}

impl FriendsPage {
    /// Decodes a page from a parsed JSON body
    ///
    /// # Returns
    ///
    /// * `Some(FriendsPage)` - The body was a JSON object
    /// * `None` - The body was some other JSON value
    pub fn from_value(body: &Value) -> Option<Self> {
        let object = body.as_object()?;

        let data = match object.get("data").and_then(Value::as_array) {
            Some(items) => items.iter().filter_map(decode_candidate).collect(),
            None => {
                tracing::debug!("Listing page has no data array, treating as empty");
                Vec::new()
            }
        };

        // null, absent and "" all end the traversal
        let next_page_cursor = object
            .get("nextPageCursor")
            .and_then(Value::as_str)
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_string);

        Some(Self {
            data,
            next_page_cursor,
        })
    }
}

fn decode_candidate(item: &Value) -> Option<Candidate> {
    match serde_json::from_value::<Candidate>(item.clone()) {
        Ok(candidate) => Some(candidate),
        Err(e) => {
            tracing::debug!("Skipping malformed listing entry {}: {}", item, e);
            None
        }
    }
}
