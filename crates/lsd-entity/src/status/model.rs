//! The License Status Document entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::license::LcpLicense;

use super::link::Link;
use super::state::Status;

/// Timestamps of the last status change and the last remote-license
/// modification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updated {
    /// Last modification of the underlying LCP license.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<DateTime<Utc>>,
    /// Last state change of this document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DateTime<Utc>>,
}

/// The furthest date any renewal may ever reach. Only set for loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialRights {
    /// Maximum end-of-loan date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

/// One License Status Document, created when the LCP sibling issues a
/// license and mutated only by the loan actions.
///
/// The serialized form is the Status Document itself: `license_ref` goes
/// on the wire as `id`, while the persistence key and the mirrored
/// end-of-loan date never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseStatus {
    /// Persistence-assigned primary key.
    #[serde(skip)]
    pub id: i64,
    /// Opaque identifier shared with the LCP server.
    #[serde(rename = "id")]
    pub license_ref: String,
    /// Current lifecycle status.
    pub status: Status,
    /// Change timestamps.
    pub updated: Updated,
    /// Localized human-readable description of `status`.
    #[serde(default)]
    pub message: String,
    /// Action links, rebuilt on every read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Count of distinct devices that ever activated this license.
    /// Persisted, but omitted from responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_count: Option<i64>,
    /// Renewal horizon; only present for loans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_rights: Option<PotentialRights>,
    /// Recent transactions, populated on read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    /// Active end-of-loan date mirrored from the LCP license. Persistence
    /// only, never serialized into the document.
    #[serde(skip)]
    pub current_end_license: Option<DateTime<Utc>>,
}

impl LicenseStatus {
    /// Build the initial document for a freshly issued license.
    ///
    /// A license without a rights end is a purchase: no end-of-loan date
    /// and no renewal horizon. A loan mirrors the rights end and gets a
    /// potential-rights end of `max(rights.end, issued + renting_days)`.
    /// The initial status is READY when device registration is offered,
    /// ACTIVE otherwise.
    pub fn for_license(
        license: &LcpLicense,
        register_available: bool,
        renting_days: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let rights_end = license.rights_end();

        let potential_rights = rights_end.map(|end| PotentialRights {
            end: Some(potential_rights_end(end, license.issued, renting_days)),
        });

        Self {
            id: 0,
            license_ref: license.id.clone(),
            status: if register_available {
                Status::Ready
            } else {
                Status::Active
            },
            updated: Updated {
                license: Some(license.issued),
                status: Some(now),
            },
            message: String::new(),
            links: Vec::new(),
            device_count: Some(0),
            potential_rights,
            events: Vec::new(),
            current_end_license: rights_end,
        }
    }

    /// Whether this document tracks a loan with an end date.
    pub fn has_rights_end(&self) -> bool {
        self.current_end_license.is_some()
    }

    /// The renewal horizon, if one is set.
    pub fn potential_end(&self) -> Option<DateTime<Utc>> {
        self.potential_rights.as_ref().and_then(|p| p.end)
    }

    /// Whether a read at `now` must lazily expire this document: the
    /// horizon has passed while the license was still open.
    pub fn should_expire(&self, now: DateTime<Utc>) -> bool {
        match self.potential_end() {
            Some(end) => now > end && self.status.allows_activation(),
            None => false,
        }
    }
}

/// The furthest date a loan may be renewed to: the license rights end,
/// extended to `issued + renting_days` when the config horizon is longer.
/// A zero `renting_days` disables the config horizon.
pub fn potential_rights_end(
    rights_end: DateTime<Utc>,
    issued: DateTime<Utc>,
    renting_days: i64,
) -> DateTime<Utc> {
    if renting_days > 0 {
        rights_end.max(issued + Duration::days(renting_days))
    } else {
        rights_end
    }
}
