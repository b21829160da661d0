//! Scriptable in-memory license updater for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use lsd_core::{AppError, AppResult};

use crate::LicenseUpdater;

/// Mock LCP client recording every PATCH and answering with a scripted
/// status code. A scripted code of zero simulates a transport failure.
#[derive(Debug)]
pub struct MockLcpClient {
    status_code: Mutex<u16>,
    calls: Mutex<Vec<(String, DateTime<Utc>)>>,
}

impl MockLcpClient {
    /// A mock answering 200 to every PATCH.
    pub fn new() -> Self {
        Self {
            status_code: Mutex::new(200),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the status code for subsequent PATCH calls; zero simulates
    /// a transport error.
    pub async fn respond_with(&self, code: u16) {
        *self.status_code.lock().await = code;
    }

    /// Every `(license_ref, end)` pair PATCHed so far.
    pub async fn calls(&self) -> Vec<(String, DateTime<Utc>)> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockLcpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LicenseUpdater for MockLcpClient {
    async fn update_rights_end(&self, license_ref: &str, end: DateTime<Utc>) -> AppResult<u16> {
        let code = *self.status_code.lock().await;
        if code == 0 {
            return Err(AppError::internal(format!(
                "LCP license PATCH failed for {license_ref}: connection refused"
            )));
        }

        self.calls
            .lock()
            .await
            .push((license_ref.to_string(), end));
        Ok(code)
    }
}
