//! Wire models for the Grokipedia API
//!
//! Every field defaults when absent so that upstream schema additions and
//! omissions do not turn into decode failures.

pub mod edit_request;
pub mod page;
pub mod search;

// Re-export commonly used types
pub use edit_request::{EditRequest, EditRequestsResponse};
pub use page::{Citation, Image, Page, PageMetadata, PageResponse, PageStats};
pub use search::{SearchResponse, SearchResult};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a count sent either as a string or as a number.
fn count_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok("0".to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a count, found {}",
            other
        ))),
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
