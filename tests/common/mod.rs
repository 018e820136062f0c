//! Mock Grokipedia upstream for integration tests.
//!
//! An axum server on an ephemeral port that mimics the three endpoints and
//! counts every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use grokipedia::{ClientConfig, GrokipediaClient, RetryPolicy};
use serde_json::json;

pub const MISSING_SLUG: &str = "NonExistentPage_12345";
pub const FLAKY_SLUG: &str = "X";
pub const GONE_SLUG: &str = "Gone";
pub const GARBAGE_SLUG: &str = "Garbage";
pub const THROTTLED_QUERY: &str = "throttled";
pub const BAD_QUERY: &str = "bad request";
pub const SLOW_QUERY: &str = "slow";

// == Mock State ==
#[derive(Clone, Default)]
pub struct Upstream {
    search_calls: Arc<AtomicUsize>,
    page_calls: Arc<AtomicUsize>,
    edit_calls: Arc<AtomicUsize>,
    user_agents: Arc<Mutex<Vec<String>>>,
    /// Remaining 503 responses for `FLAKY_SLUG`; `None` fails forever
    flaky_failures: Arc<Mutex<Option<usize>>>,
}

impl Upstream {
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn edit_calls(&self) -> usize {
        self.edit_calls.load(Ordering::SeqCst)
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }

    /// `FLAKY_SLUG` answers 503 this many times, then succeeds.
    pub fn fail_flaky_times(&self, times: usize) {
        *self.flaky_failures.lock().unwrap() = Some(times);
    }

    fn record(&self, counter: &AtomicUsize, headers: &HeaderMap) {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(agent) = headers.get("user-agent").and_then(|v| v.to_str().ok()) {
            self.user_agents.lock().unwrap().push(agent.to_string());
        }
    }
}

// == Handlers ==
async fn search_handler(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.record(&upstream.search_calls, &headers);
    let query = params.get("query").cloned().unwrap_or_default();
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(12);
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);

    match query.as_str() {
        THROTTLED_QUERY => return StatusCode::TOO_MANY_REQUESTS.into_response(),
        BAD_QUERY => return StatusCode::BAD_REQUEST.into_response(),
        SLOW_QUERY => tokio::time::sleep(Duration::from_secs(5)).await,
        _ => {}
    }

    // 8 matching articles exist for every query
    let results: Vec<_> = (offset..8)
        .take(limit)
        .map(|i| {
            json!({
                "title": format!("{} {}", query, i),
                "slug": format!("{}_{}", query.replace(' ', "_"), i),
                "snippet": format!("<em>{}</em> article {}", query, i),
                "relevanceScore": 10.0 - i as f64,
                "viewCount": (i * 100).to_string(),
            })
        })
        .collect();
    Json(json!({ "results": results, "totalCount": 8 })).into_response()
}

async fn page_handler(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.record(&upstream.page_calls, &headers);
    let slug = params.get("slug").cloned().unwrap_or_default();
    let include_content = params.get("includeContent").map(String::as_str) != Some("false");

    match slug.as_str() {
        MISSING_SLUG => return Json(json!({ "found": false, "page": null })).into_response(),
        GONE_SLUG => return StatusCode::NOT_FOUND.into_response(),
        GARBAGE_SLUG => return (StatusCode::OK, "<html>oops</html>").into_response(),
        FLAKY_SLUG => {
            let mut remaining = upstream.flaky_failures.lock().unwrap();
            match remaining.as_mut() {
                Some(0) => {}
                Some(n) => {
                    *n -= 1;
                    return StatusCode::SERVICE_UNAVAILABLE.into_response();
                }
                None => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
            }
        }
        _ => {}
    }

    let content = if include_content {
        format!("# {}\n\nAbout {}.", slug, slug)
    } else {
        String::new()
    };
    Json(json!({
        "found": true,
        "page": {
            "slug": slug,
            "title": slug.replace('_', " "),
            "content": content,
            "description": format!("Article about {}", slug),
            "citations": [{"id": "1", "title": "Source", "description": "", "url": "https://example.com"}],
            "images": [],
            "stats": {"totalViews": "42", "dailyAvgViews": 1.0}
        }
    }))
    .into_response()
}

async fn edit_requests_handler(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.record(&upstream.edit_calls, &headers);
    let slug = params.get("slug").cloned().unwrap_or_default();
    let limit: u64 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(10);

    let edits: Vec<_> = (0..limit.min(3))
        .map(|i| {
            json!({
                "id": format!("er_{}", i),
                "slug": slug,
                "status": "EDIT_REQUEST_STATUS_APPROVED",
                "type": "EDIT_REQUEST_TYPE_FIX_TYPO",
                "summary": format!("Fix {}", i),
            })
        })
        .collect();
    Json(json!({ "editRequests": edits, "totalCount": 3, "hasMore": limit < 3 })).into_response()
}

// == Helper Functions ==
/// Starts the mock upstream and returns its state and address.
pub async fn spawn_upstream() -> (Upstream, SocketAddr) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/api/full-text-search", get(search_handler))
        .route("/api/page", get(page_handler))
        .route("/api/list-edit-requests-by-slug", get(edit_requests_handler))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (upstream, addr)
}

/// Fast retries so failure tests finish quickly.
pub fn test_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::builder()
        .base_url(format!("http://{}", addr))
        .timeout(Duration::from_secs(2))
        .retry(RetryPolicy::new(
            3,
            Duration::from_millis(10),
            Duration::from_millis(40),
        ))
        .build()
}

pub async fn test_client() -> (Upstream, GrokipediaClient) {
    let (upstream, addr) = spawn_upstream().await;
    let client = GrokipediaClient::new(test_config(addr)).unwrap();
    (upstream, client)
}
