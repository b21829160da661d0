//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use lsd_core::config::AppConfig;
use lsd_service::{ComplianceAudit, LicenseStatusService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the concrete stores and
/// the LCP client live behind the service, so the router can also be
/// built over in-memory backends in tests.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// License-status state machine and loan-transaction engine.
    pub service: Arc<LicenseStatusService>,
    /// Conformance audit sink.
    pub compliance: Arc<ComplianceAudit>,
}
