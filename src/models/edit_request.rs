//! Edit request models
//!
//! Response body of `GET /api/list-edit-requests-by-slug`.

use serde::{Deserialize, Serialize};

/// A proposed change to a page and its review state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditRequest {
    pub id: String,
    pub slug: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    pub original_content: String,
    pub proposed_content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One page of edit requests for a slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditRequestsResponse {
    pub edit_requests: Vec<EditRequest>,
    pub total_count: u64,
    pub has_more: bool,
}
