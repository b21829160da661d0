//! Hypermedia links embedded in a Status Document.

use serde::{Deserialize, Serialize};

/// A link in the Status Document `links` array. `href` may be an RFC 6570
/// URI Template when `templated` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL or URI Template.
    pub href: String,
    /// Relation: `license`, `register`, `return`, or `renew`.
    pub rel: String,
    /// Media type of the target.
    #[serde(rename = "type")]
    pub media_type: String,
    /// Whether `href` is a URI Template the client must expand.
    #[serde(default, skip_serializing_if = "is_false")]
    pub templated: bool,
}

impl Link {
    /// A plain (non-templated) link.
    pub fn new(href: impl Into<String>, rel: impl Into<String>, media_type: &str) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            media_type: media_type.to_string(),
            templated: false,
        }
    }

    /// A templated link.
    pub fn templated(href: impl Into<String>, rel: impl Into<String>, media_type: &str) -> Self {
        Self {
            templated: true,
            ..Self::new(href, rel, media_type)
        }
    }
}

fn is_false(value: &bool) -> bool {
    !value
}
