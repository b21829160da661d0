//! HTTP implementation of the LCP license updater.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use lsd_core::config::{LcpServerConfig, LcpUpdateAuth};
use lsd_core::types::content_type;
use lsd_core::{AppError, AppResult};

use crate::LicenseUpdater;

/// Total deadline for one license PATCH.
const PATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Real HTTP client for the LCP license server.
///
/// Wraps a `reqwest::Client` with the LCP base URL and optional HTTP
/// Basic credentials; shared via `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct HttpLcpClient {
    client: reqwest::Client,
    base_url: String,
    auth: LcpUpdateAuth,
}

impl HttpLcpClient {
    /// Build a client from configuration. Fails when the LCP base URL is
    /// not configured.
    pub fn new(lcp: &LcpServerConfig, auth: &LcpUpdateAuth) -> AppResult<Self> {
        if lcp.public_base_url.is_empty() {
            return Err(AppError::configuration(
                "lcp_server.public_base_url is not set",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(PATCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build LCP HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: lcp.public_base_url.trim_end_matches('/').to_string(),
            auth: auth.clone(),
        })
    }
}

#[async_trait]
impl LicenseUpdater for HttpLcpClient {
    async fn update_rights_end(&self, license_ref: &str, end: DateTime<Utc>) -> AppResult<u16> {
        let url = format!("{}/licenses/{}", self.base_url, license_ref);
        let body = serde_json::json!({
            "id": license_ref,
            "rights": { "end": end },
        });

        let mut request = self
            .client
            .patch(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type::LCP_JSON)
            .json(&body);

        if !self.auth.username.is_empty() {
            request = request.basic_auth(&self.auth.username, Some(&self.auth.password));
        }

        let response = request.send().await.map_err(|e| {
            AppError::internal(format!("LCP license PATCH failed for {license_ref}: {e}"))
        })?;

        let code = response.status().as_u16();
        if code != 200 {
            warn!(license_ref = %license_ref, code = code, "LCP server answered license PATCH");
        }

        Ok(code)
    }
}
