//! The subset of an LCP license this service consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rights granted by a license. Only the end date matters to status
/// tracking; a license without one is a purchase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseRights {
    /// End of the loan, absent for purchases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

/// A freshly issued LCP license, as posted by the sibling server when it
/// creates the status document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LcpLicense {
    /// Opaque license identifier.
    pub id: String,
    /// Issuance timestamp.
    pub issued: DateTime<Utc>,
    /// Granted rights; absent or end-less for purchases.
    #[serde(default)]
    pub rights: Option<LicenseRights>,
}

impl LcpLicense {
    /// The loan end date, if this license is a loan.
    pub fn rights_end(&self) -> Option<DateTime<Utc>> {
        self.rights.as_ref().and_then(|r| r.end)
    }
}
