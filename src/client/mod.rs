//! Request Client
//!
//! Composes cache lookup, the HTTP call, response validation, cache
//! population and error classification for every upstream operation.
//!
//! # Operations
//! - `search` - `GET /api/full-text-search`
//! - `get_page` - `GET /api/page`
//! - `search_pages` - `search` unwrapped to its result list
//! - `list_edit_requests_by_slug` - `GET /api/list-edit-requests-by-slug`

mod batch;
mod operation;

pub use operation::Operation;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheEntryInfo, CacheKey, CacheStats, CacheStore};
use crate::config::ClientConfig;
use crate::error::{classify_decode, classify_status, classify_transport, GrokipediaError, Result};
use crate::models::{EditRequestsResponse, PageResponse, SearchResponse, SearchResult};
use crate::retry::{self, RetryPolicy};

/// Default page size for searches.
pub const DEFAULT_SEARCH_LIMIT: u32 = 12;
/// Default page size for edit request listings.
pub const DEFAULT_EDIT_REQUEST_LIMIT: u32 = 10;

/// Shared response cache; payloads are kept as raw JSON.
type SharedCache = Arc<RwLock<CacheStore<Value>>>;

// == Grokipedia Client ==
/// Client for the Grokipedia HTTP API.
///
/// Cloning is cheap: clones share the connection pool and the response cache.
/// A caller sees either a decoded response or one [`GrokipediaError`];
/// failures are never cached.
#[derive(Debug, Clone)]
pub struct GrokipediaClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    retry: RetryPolicy,
    cache: SharedCache,
}

impl GrokipediaClient {
    // == Constructor ==
    /// Creates a client with its own empty cache.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GrokipediaError::Transport {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        info!(
            base_url = %config.base_url,
            cache_enabled = config.cache_enabled,
            cache_ttl_secs = config.cache_ttl.as_secs(),
            max_attempts = config.retry.max_attempts(),
            "Grokipedia client initialized"
        );

        Ok(Self {
            http,
            retry: config.retry,
            cache: Arc::new(RwLock::new(CacheStore::new(config.cache_ttl))),
            config: Arc::new(config),
        })
    }

    /// Creates a client from `GROKIPEDIA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Policy applied by this handle.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns a handle that retries under `policy` but shares this client's
    /// cache and connection pool.
    pub fn with_retry_policy(&self, policy: RetryPolicy) -> Self {
        Self {
            retry: policy,
            ..self.clone()
        }
    }

    // == Search ==
    /// Full-text search.
    pub async fn search(&self, query: &str, limit: u32, offset: u32) -> Result<SearchResponse> {
        let params = [
            ("query", query.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch(
            Operation::Search,
            CacheKey::search(query, limit, offset),
            Operation::Search.name(),
            &params,
            |_| Ok(()),
        )
        .await
    }

    /// Search returning only the result list.
    pub async fn search_pages(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>> {
        Ok(self.search(query, limit, 0).await?.results)
    }

    // == Get Page ==
    /// Fetches a page by slug.
    ///
    /// A `found: false` body is reported as [`GrokipediaError::NotFound`]
    /// even though the upstream answers it with HTTP 200.
    pub async fn get_page(
        &self,
        slug: &str,
        include_content: bool,
        validate_links: bool,
    ) -> Result<PageResponse> {
        let params = [
            ("slug", slug.to_string()),
            ("includeContent", include_content.to_string()),
            ("validateLinks", validate_links.to_string()),
        ];
        self.fetch(
            Operation::GetPage,
            CacheKey::page(slug, include_content, validate_links),
            slug,
            &params,
            |page: &PageResponse| {
                if page.found {
                    Ok(())
                } else {
                    Err(GrokipediaError::not_found(slug))
                }
            },
        )
        .await
    }

    // == Edit Requests ==
    /// Lists edit requests filed against a page.
    pub async fn list_edit_requests_by_slug(
        &self,
        slug: &str,
        limit: u32,
        offset: u32,
    ) -> Result<EditRequestsResponse> {
        let params = [
            ("slug", slug.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.fetch(
            Operation::ListEditRequests,
            CacheKey::edit_requests(slug, limit, offset),
            slug,
            &params,
            |_| Ok(()),
        )
        .await
    }

    // == Cache Management ==
    /// Drops every cached response.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        debug!("response cache cleared");
    }

    /// Releases client resources. The connection pool is released when the
    /// last clone is dropped, so this only empties the cache.
    pub async fn close(&self) {
        self.clear_cache().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Timing details of one cached response, if present.
    pub async fn cache_info(&self, key: &CacheKey) -> Option<CacheEntryInfo> {
        self.cache.read().await.info(key)
    }

    // == Orchestration ==
    /// Cache check, then retried request + decode + validation, then cache store.
    async fn fetch<T, V>(
        &self,
        operation: Operation,
        key: CacheKey,
        resource: &str,
        params: &[(&str, String)],
        validate: V,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        V: Fn(&T) -> Result<()>,
    {
        if self.config.cache_enabled {
            let cached = self.cache.write().await.get(&key);
            if let Some(raw) = cached {
                debug!(key = %key, "cache hit");
                return serde_json::from_value(raw).map_err(|e| classify_decode(&e, operation));
            }
            debug!(key = %key, "cache miss");
        }

        let validate = &validate;
        let (raw, parsed) = retry::execute(&self.retry, || async move {
            let raw = self.send(operation, resource, params).await?;
            let parsed: T = serde_json::from_value(raw.clone())
                .map_err(|e| classify_decode(&e, operation))?;
            validate(&parsed)?;
            Ok((raw, parsed))
        })
        .await?;

        if self.config.cache_enabled {
            self.cache.write().await.set(key, raw);
        }
        Ok(parsed)
    }

    /// One HTTP round trip, classified.
    async fn send(
        &self,
        operation: Operation,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, operation.path());
        debug!(%url, %operation, "sending request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| classify_transport(&e, operation))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, operation, resource));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&e, operation))?;
        serde_json::from_slice(&body).map_err(|e| classify_decode(&e, operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_config() -> ClientConfig {
        // Port 9 (discard) on loopback is closed in test environments
        ClientConfig::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .retry(RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(1)))
            .build()
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = GrokipediaClient::new(unreachable_config()).unwrap();

        let err = client.search("rust", 5, 0).await.unwrap_err();

        assert!(matches!(err, GrokipediaError::Transport { .. }), "got {:?}", err);
        assert!(err.to_string().contains("search"));
        assert_eq!(client.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_with_retry_policy_shares_cache() {
        let client = GrokipediaClient::new(ClientConfig::default()).unwrap();
        let single = client.with_retry_policy(RetryPolicy::no_retry());

        assert_eq!(single.retry_policy().max_attempts(), 1);
        assert_eq!(client.retry_policy().max_attempts(), 3);
        assert!(Arc::ptr_eq(&client.cache, &single.cache));
    }

    #[tokio::test]
    async fn test_close_empties_cache() {
        let client = GrokipediaClient::new(ClientConfig::default()).unwrap();
        client
            .cache
            .write()
            .await
            .set(CacheKey::search("q", 1, 0), serde_json::json!({"results": []}));

        client.close().await;

        assert_eq!(client.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_cached_payload_served_without_network() {
        // Nothing listens on the configured host, so a hit proves no request was made
        let client = GrokipediaClient::new(unreachable_config()).unwrap();
        let key = CacheKey::search("cached", 12, 0);
        client.cache.write().await.set(
            key.clone(),
            serde_json::json!({"results": [{"title": "Cached", "slug": "Cached"}]}),
        );

        let results = client.search_pages("cached", 12).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "Cached");
        assert!(client.cache_info(&key).await.is_some());
        assert_eq!(client.cache_stats().await.hits, 1);
    }
}
