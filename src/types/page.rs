//! The page shape returned by suggestion queries.

use crate::types::station::ScoredStation;
use serde::Serialize;

/// One page of scored suggestions.
///
/// `end_cursor` points just past the last station of this page and is only
/// present when another page exists, so it can be fed back verbatim as the
/// `after` cursor of the next request.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestPage {
    pub stations: Vec<ScoredStation>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl SuggestPage {
    /// A page with no results and no continuation.
    pub(crate) fn empty() -> Self {
        Self {
            stations: Vec::new(),
            has_next_page: false,
            end_cursor: None,
        }
    }
}
