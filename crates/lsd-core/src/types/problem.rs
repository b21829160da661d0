//! RFC 7807 problem document returned on every error response.

use serde::{Deserialize, Serialize};

/// Problem-details body with the `detail` member conformance clients read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Problem type URI; `about:blank` when the HTTP status says it all.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary, optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP status code duplicated in the body.
    pub status: u16,
    /// Human-readable explanation specific to this occurrence.
    pub detail: String,
}

impl Problem {
    /// Create a problem document for the given status and detail.
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: None,
            status,
            detail: detail.into(),
        }
    }
}
