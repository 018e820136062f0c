//! Concurrent batch helpers
//!
//! Fan a list of queries or slugs out over one client. Each call keeps its
//! own cache lookup and retry loop; there is no request coalescing.

use futures::future::join_all;
use tracing::warn;

use super::GrokipediaClient;
use crate::models::{PageResponse, SearchResult};

impl GrokipediaClient {
    /// Runs several searches concurrently and concatenates their results in
    /// query order. Failed queries are logged and skipped.
    pub async fn search_many<S: AsRef<str>>(&self, queries: &[S], limit: u32) -> Vec<SearchResult> {
        let outcomes = join_all(
            queries
                .iter()
                .map(|query| self.search(query.as_ref(), limit, 0)),
        )
        .await;

        let mut results = Vec::new();
        for (query, outcome) in queries.iter().zip(outcomes) {
            match outcome {
                Ok(response) => results.extend(response.results),
                Err(err) => warn!(query = query.as_ref(), error = %err, "search failed in batch"),
            }
        }
        results
    }

    /// Fetches several pages concurrently, in slug order. Pages that fail,
    /// including unknown slugs, are logged and skipped.
    pub async fn get_many_pages<S: AsRef<str>>(
        &self,
        slugs: &[S],
        include_content: bool,
    ) -> Vec<PageResponse> {
        let outcomes = join_all(
            slugs
                .iter()
                .map(|slug| self.get_page(slug.as_ref(), include_content, true)),
        )
        .await;

        slugs
            .iter()
            .zip(outcomes)
            .filter_map(|(slug, outcome)| match outcome {
                Ok(page) => Some(page),
                Err(err) => {
                    warn!(slug = slug.as_ref(), error = %err, "page fetch failed in batch");
                    None
                }
            })
            .collect()
    }
}
