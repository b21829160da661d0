//! # lsd-lcp
//!
//! Outbound collaborator for the sibling LCP license server. The only
//! operation the status service needs is a PATCH moving a license's
//! rights end date; the contract returns the remote HTTP status code so
//! callers can propagate non-success verbatim.

pub mod client;
pub mod mock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lsd_core::AppResult;

pub use client::HttpLcpClient;
pub use mock::MockLcpClient;

/// Contract for updating the remote license.
///
/// Implementations must be called **before** the local end date is
/// persisted, so that divergence is one-sided: a failed remote call
/// leaves the local store unchanged.
#[async_trait]
pub trait LicenseUpdater: Send + Sync + 'static {
    /// PATCH the remote license's rights end. Returns the remote HTTP
    /// status code; transport failures map to internal errors.
    async fn update_rights_end(&self, license_ref: &str, end: DateTime<Utc>) -> AppResult<u16>;
}

/// Whether a remote status code counts as success for a license PATCH.
pub fn patch_succeeded(code: u16) -> bool {
    code == 200 || code == 206
}
