//! License status enumeration and its transition rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lsd_core::AppError;

/// Lifecycle status of a license.
///
/// Transitions are driven exclusively by the loan actions: register moves
/// READY to ACTIVE, return closes the loan, renew keeps it ACTIVE, and
/// cancel/revoke terminate a license that was never activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Issued, no device has activated it yet.
    Ready,
    /// At least one device activated the license.
    Active,
    /// The loan was returned by the user.
    Returned,
    /// The potential-rights horizon passed without a return.
    Expired,
    /// Cancelled by the provider before any activation.
    Cancelled,
    /// Revoked by the provider before any activation.
    Revoked,
}

impl Status {
    /// Whether register and renew are permitted in this status.
    pub fn allows_activation(self) -> bool {
        matches!(self, Self::Ready | Self::Active)
    }

    /// The transition taken by a return, or the status-gated denial.
    ///
    /// An active loan becomes RETURNED; a never-activated license becomes
    /// CANCELLED. Every closed status yields a 403 naming its state.
    pub fn on_return(self) -> Result<Status, AppError> {
        match self {
            Self::Active => Ok(Self::Returned),
            Self::Ready => Ok(Self::Cancelled),
            Self::Returned => Err(AppError::forbidden("License has been already returned")),
            Self::Expired => Err(AppError::forbidden("License is expired")),
            Self::Cancelled => Err(AppError::forbidden("License is cancelled")),
            Self::Revoked => Err(AppError::forbidden("License is revoked")),
        }
    }

    /// Whether a cancel/revoke PATCH is permitted in this status.
    ///
    /// Only a never-activated license may be cancelled or revoked.
    pub fn allows_cancellation(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Lowercase wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Active => "active",
            Self::Returned => "returned",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Self::Ready),
            "active" => Ok(Self::Active),
            "returned" => Ok(Self::Returned),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            "revoked" => Ok(Self::Revoked),
            _ => Err(AppError::bad_request(format!(
                "Invalid license status: '{s}'"
            ))),
        }
    }
}
