//! Public URLs of this server and its LCP sibling, plus PATCH credentials.

use serde::{Deserialize, Serialize};

/// Public-facing settings of this LSD server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsdServerConfig {
    /// Base URL used when building action links.
    pub public_base_url: String,
    /// Optional template for the `license` link. `{license_id}` is
    /// substituted; when unset the LCP base URL is used instead.
    #[serde(default)]
    pub license_link_url: Option<String>,
}

/// Settings of the sibling LCP license server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LcpServerConfig {
    /// Base URL for the license link and the outbound PATCH.
    pub public_base_url: String,
}

/// HTTP Basic credentials sent on the license PATCH. Empty username
/// disables authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LcpUpdateAuth {
    /// Basic auth username.
    #[serde(default)]
    pub username: String,
    /// Basic auth password.
    #[serde(default)]
    pub password: String,
}
