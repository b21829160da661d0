//! Loan transaction events.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lsd_core::AppError;

/// Kind of loan transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// A device activated the license.
    Register,
    /// The loan was returned.
    Return,
    /// The loan end date was extended.
    Renew,
}

impl EventType {
    /// Whether an event of this type leaves the device active.
    ///
    /// A device is active iff its most recent event is a register or a
    /// renew; a return deactivates it.
    pub fn keeps_device_active(self) -> bool {
        matches!(self, Self::Register | Self::Renew)
    }

    /// Lowercase wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Return => "return",
            Self::Renew => "renew",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(Self::Register),
            "return" => Ok(Self::Return),
            "renew" => Ok(Self::Renew),
            _ => Err(AppError::bad_request(format!("Invalid event type: '{s}'"))),
        }
    }
}

/// One recorded loan transaction. Belongs to exactly one status document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Persistence-assigned identifier.
    #[serde(skip)]
    pub id: i64,
    /// Owning status document.
    #[serde(skip)]
    pub license_status_fk: i64,
    /// Device that performed the transaction; may be empty for anonymous
    /// return/renew calls.
    #[serde(rename = "id")]
    pub device_id: String,
    /// Device display name.
    #[serde(rename = "name")]
    pub device_name: String,
    /// When the transaction happened.
    pub timestamp: DateTime<Utc>,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl Event {
    /// Build an event for the given document at `timestamp`.
    pub fn new(
        event_type: EventType,
        license_status_fk: i64,
        device_id: &str,
        device_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            license_status_fk,
            device_id: device_id.to_string(),
            device_name: device_name.to_string(),
            timestamp,
            event_type,
        }
    }
}

/// A currently-registered device: its most recent event is a register or
/// renew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveDevice {
    /// Device identifier.
    #[serde(rename = "id")]
    pub device_id: String,
    /// Device display name.
    #[serde(rename = "name")]
    pub device_name: String,
    /// Timestamp of the device's most recent activation event.
    pub timestamp: DateTime<Utc>,
}

/// Response body of the registered-devices listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredDevices {
    /// The license these devices belong to.
    pub id: String,
    /// Devices whose most recent event is a register or renew.
    pub devices: Vec<ActiveDevice>,
}
