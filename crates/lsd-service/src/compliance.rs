//! Conformance audit sink.
//!
//! While a compliance scenario is running, every action appends a
//! `<test-number>|<action>|<http-status>` line to the configured file.
//! Outside a scenario (or when disabled) recording is a no-op.

use std::fs::OpenOptions;
use std::io::Write;

use tokio::sync::Mutex;
use tracing::error;

use lsd_core::config::ComplianceConfig;

/// Audit action name for a Status Document read.
pub const LICENSE_STATUS: &str = "status";
/// Audit action name for a device registration.
pub const REGISTER_DEVICE: &str = "register";
/// Audit action name for a lending return.
pub const RETURN_LICENSE: &str = "return";
/// Audit action name for a lending renewal.
pub const RENEW_LICENSE: &str = "renew";
/// Audit action name for a cancel/revoke.
pub const CANCEL_REVOKE_LICENSE: &str = "cancel";

/// Append-only compliance audit sink.
#[derive(Debug)]
pub struct ComplianceAudit {
    config: ComplianceConfig,
    /// Active test number; empty when no scenario is running.
    test_number: Mutex<String>,
}

impl ComplianceAudit {
    /// Create the sink. No file is touched until a line is recorded.
    pub fn new(config: ComplianceConfig) -> Self {
        Self {
            config,
            test_number: Mutex::new(String::new()),
        }
    }

    /// Start recording under the given test number.
    pub async fn start_test(&self, test_number: &str) {
        *self.test_number.lock().await = test_number.to_string();
    }

    /// Stop recording.
    pub async fn end_test(&self) {
        self.test_number.lock().await.clear();
    }

    /// Append one outcome line for `action`, if a scenario is active.
    pub async fn record(&self, action: &str, http_status: u16) {
        if !self.config.enabled {
            return;
        }

        let test_number = self.test_number.lock().await;
        if test_number.is_empty() {
            return;
        }

        let line = format!("{}|{}|{}\n", *test_number, action, http_status);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.file)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            error!(file = %self.config.file, error = %e, "Failed to write compliance audit line");
        }
    }
}
