use std::time::Duration;

use log::debug;
use parking_lot::Mutex;

use crate::cache::TtlCache;
use crate::stations::catalog::StationCatalog;
use crate::stations::cursor::{decode_cursor, encode_cursor};
use crate::stations::score::{normalize, score_station};
use crate::types::page::SuggestPage;
use crate::types::station::ScoredStation;

/// Page size applied when a caller does not pass a limit.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

const MIN_SUGGESTION_LIMIT: usize = 1;
const MAX_SUGGESTION_LIMIT: usize = 50;

pub(crate) const DEFAULT_SUGGESTION_TTL: Duration = Duration::from_secs(300);

/// Ranked, paginated station lookup over a fixed catalog.
///
/// Scoring a query walks the whole catalog, so the full ranked list is
/// cached per normalized query and page size, and pages are sliced out
/// of the cached list. Every page of one walk therefore sees a
/// consistent ordering for the lifetime of the cache entry.
pub struct SuggestEngine {
    catalog: StationCatalog,
    cache: Mutex<TtlCache<(String, usize), Vec<ScoredStation>>>,
    ttl: Duration,
}

impl SuggestEngine {
    pub fn new(catalog: StationCatalog) -> Self {
        Self::with_ttl(catalog, DEFAULT_SUGGESTION_TTL)
    }

    pub fn with_ttl(catalog: StationCatalog, ttl: Duration) -> Self {
        Self {
            catalog,
            cache: Mutex::new(TtlCache::new()),
            ttl,
        }
    }

    /// Returns one page of stations matching `query`, best match first.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-form search text. Matching is case-insensitive
    ///   and ignores diacritics.
    /// * `limit` - Maximum stations per page, clamped to `1..=50`.
    /// * `after` - Cursor from a previous page's `end_cursor`, or `None`
    ///   for the first page. Malformed cursors restart at the top.
    ///
    /// # Returns
    ///
    /// A [`SuggestPage`] with the requested window, a flag telling
    /// whether more results follow, and the cursor for the next page. A
    /// query that is empty after normalization yields an empty page.
    pub fn suggest(&self, query: &str, limit: usize, after: Option<&str>) -> SuggestPage {
        let limit = limit.clamp(MIN_SUGGESTION_LIMIT, MAX_SUGGESTION_LIMIT);
        let offset = after.map(decode_cursor).unwrap_or(0);

        let normalized = normalize(query);
        if normalized.is_empty() {
            return SuggestPage::empty();
        }

        let ranked = self.ranked(normalized, limit);
        let mut stations: Vec<ScoredStation> =
            ranked.into_iter().skip(offset).take(limit + 1).collect();
        let has_next_page = stations.len() > limit;
        stations.truncate(limit);

        let end_cursor = if has_next_page && !stations.is_empty() {
            Some(encode_cursor(offset + stations.len()))
        } else {
            None
        };

        SuggestPage {
            stations,
            has_next_page,
            end_cursor,
        }
    }

    /// Scores the whole catalog against `normalized`, dropping
    /// non-matches and sorting best first. Served from cache when a
    /// previous call already ranked the same query at the same page
    /// size.
    fn ranked(&self, normalized: String, limit: usize) -> Vec<ScoredStation> {
        let key = (normalized, limit);
        if let Some(hit) = self.cache.lock().get(&key) {
            debug!("Returning cached suggestions for '{}'", key.0);
            return hit;
        }

        let tokens: Vec<String> = key.0.split_whitespace().map(str::to_owned).collect();
        let mut scored = Vec::new();
        for station in self.catalog.stations() {
            let score = score_station(station, &key.0, &tokens);
            if score > 0 {
                scored.push(ScoredStation {
                    station: station.clone(),
                    score,
                });
            }
        }
        // Ties keep catalog order; the sort is stable.
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        // Two callers may rank the same query concurrently; last write
        // wins and both computed the same list.
        self.cache.lock().set(key, scored.clone(), self.ttl);
        scored
    }

    /// Drops expired ranked lists.
    pub fn sweep_cache(&self) {
        self.cache.lock().cleanup();
    }
}
