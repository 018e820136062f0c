//! Page models
//!
//! Response body of `GET /api/page`.

use serde::{Deserialize, Serialize};

use super::{count_as_string, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub favicon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: String,
    pub caption: String,
    pub url: String,
    pub position: String,
    pub width: u32,
    pub height: u32,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            id: String::new(),
            caption: String::new(),
            url: String::new(),
            position: "CENTER".to_string(),
            width: 0,
            height: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadata {
    pub categories: Vec<String>,
    pub last_modified: String,
    #[serde(deserialize_with = "count_as_string")]
    pub content_length: String,
    pub version: String,
    pub last_editor: String,
    pub language: String,
    pub is_redirect: bool,
    pub redirect_target: String,
    pub is_withheld: bool,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            last_modified: String::new(),
            content_length: String::new(),
            version: "1.0".to_string(),
            last_editor: "system".to_string(),
            language: "en".to_string(),
            is_redirect: false,
            redirect_target: String::new(),
            is_withheld: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageStats {
    #[serde(deserialize_with = "count_as_string")]
    pub total_views: String,
    #[serde(deserialize_with = "count_as_string")]
    pub recent_views: String,
    pub daily_avg_views: f64,
    pub quality_score: f64,
    pub last_viewed: String,
}

impl Default for PageStats {
    fn default() -> Self {
        Self {
            total_views: "0".to_string(),
            recent_views: "0".to_string(),
            daily_avg_views: 0.0,
            quality_score: 0.0,
            last_viewed: String::new(),
        }
    }
}

/// A knowledge-base article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub slug: String,
    pub title: String,
    /// Markdown body; empty when requested without content
    pub content: String,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PageStats>,
}

/// Page lookup result.
///
/// The upstream answers an unknown slug with HTTP 200 and `found: false`,
/// usually with `page: null`; the client turns that into a not-found error
/// before a caller ever sees this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub page: Page,
    pub found: bool,
}
