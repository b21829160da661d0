//! Listing filter for the heavy-use license query.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Query parameters for `GET /licenses/`: minimum distinct device count
/// plus 1-based pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceFilter {
    /// Minimum distinct device count a license must have reached.
    #[serde(default = "default_devices")]
    pub devices: i64,
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of licenses per page.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

impl DeviceFilter {
    /// Reject non-positive values. All three parameters are 1-based.
    pub fn validate(&self) -> AppResult<()> {
        if self.devices < 1 || self.page < 1 || self.per_page < 1 {
            return Err(AppError::bad_request(
                "devices, page, per_page must be positive numbers",
            ));
        }
        Ok(())
    }

    /// The SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// The SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self {
            devices: default_devices(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

fn default_devices() -> i64 {
    1
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}
