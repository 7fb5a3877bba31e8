//! Search result and response types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An incoming link recorded against a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// URL of the page that links to the result.
    pub link: String,
}

impl LinkRef {
    /// Creates a link reference.
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

/// A single search result as returned by the search API.
///
/// Immutable once received; ranking re-orders results but never rewrites
/// their fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result URL.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Result description/snippet.
    pub description: String,
    /// Relevance score assigned by the search API.
    #[serde(default)]
    pub score: f64,
    /// Pages linking to this result, present when link data was requested.
    #[serde(default)]
    pub links_from: Option<Vec<LinkRef>>,
    /// Popularity rank of the result's website. Lower is better.
    #[serde(default)]
    pub top_website_rank: Option<u64>,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            score: 0.0,
            links_from: None,
            top_website_rank: None,
        }
    }

    /// Sets the primary relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Sets the incoming links.
    pub fn with_links_from(mut self, links: Vec<LinkRef>) -> Self {
        self.links_from = Some(links);
        self
    }

    /// Sets the website popularity rank.
    pub fn with_website_rank(mut self, rank: u64) -> Self {
        self.top_website_rank = Some(rank);
        self
    }
}

/// Timing breakdown reported by the search API.
///
/// Carried opaquely except for the total, which is what gets displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeTaken {
    /// Wall-clock time of the whole request, in seconds.
    #[serde(default)]
    pub total_request: Option<f64>,
    /// Any additional timing fields the API reports.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Successful response payload from the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Raw results in API order.
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Total number of webpages matching the query.
    #[serde(default)]
    pub matching_webpages: u64,
    /// Timing breakdown for the request.
    #[serde(default)]
    pub time_taken: TimeTaken,
}

/// Display statistics derived from a successful response.
///
/// Recomputed as a whole on every successful response, never field by
/// field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of results received.
    pub result_count: usize,
    /// Total matches reported by the API.
    pub total_matches: u64,
    /// Timing breakdown for the request.
    pub time_taken: TimeTaken,
}

impl SearchStats {
    /// Derives stats from a response payload.
    pub fn from_response(response: &SearchResponse) -> Self {
        Self {
            result_count: response.results.len(),
            total_matches: response.matching_webpages,
            time_taken: response.time_taken.clone(),
        }
    }
}
