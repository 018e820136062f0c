//! Search models
//!
//! Response body of `GET /api/full-text-search`.

use serde::{Deserialize, Serialize};

use super::count_as_string;

/// A single full-text search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub title: String,
    pub slug: String,
    /// Snippet with `<em>` highlight markup from the upstream index
    pub snippet: String,
    pub relevance_score: f64,
    #[serde(deserialize_with = "count_as_string")]
    pub view_count: String,
    pub title_highlights: Vec<String>,
    pub snippet_highlights: Vec<String>,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            snippet: String::new(),
            relevance_score: 0.0,
            view_count: "0".to_string(),
            title_highlights: Vec::new(),
            snippet_highlights: Vec::new(),
        }
    }
}

/// Search results page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(alias = "total_count", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}
