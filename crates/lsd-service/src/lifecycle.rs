//! Action handlers for the license-status state machine.
//!
//! Every mutation follows the same shape: load the document, apply the
//! state-machine rules, append the transaction event, notify the LCP
//! sibling when the end date moves, then persist. The LCP PATCH runs
//! before the status row is written so a failed remote call leaves the
//! local document unchanged; the already-appended event stays behind as
//! the audit record of the attempt.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use lsd_core::config::{AppConfig, LicenseStatusConfig};
use lsd_core::{AppError, AppResult};
use lsd_entity::event::{Event, EventType};
use lsd_entity::license::LcpLicense;
use lsd_entity::status::{LicenseStatus, Status};
use lsd_entity::store::{EventStore, StatusStore};
use lsd_lcp::{patch_succeeded, LicenseUpdater};

use crate::links::LinkBuilder;
use crate::localization::MessageCatalog;
use crate::locks::LicenseLocks;

/// Device identification sent with register/return/renew calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceParams {
    /// Device identifier; mandatory for register, optional otherwise.
    #[serde(default)]
    pub id: String,
    /// Device display name.
    #[serde(default)]
    pub name: String,
}

/// Parameters of a renewal call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenewParams {
    /// Device identifier, optional.
    #[serde(default)]
    pub id: String,
    /// Device display name, optional.
    #[serde(default)]
    pub name: String,
    /// Explicit RFC 3339 end date; when absent the configured
    /// `renew_days` extension applies.
    #[serde(default)]
    pub end: Option<String>,
}

/// The license-status service: one instance shared by all handlers.
pub struct LicenseStatusService {
    statuses: Arc<dyn StatusStore>,
    events: Arc<dyn EventStore>,
    lcp: Arc<dyn LicenseUpdater>,
    catalog: Arc<MessageCatalog>,
    links: LinkBuilder,
    config: LicenseStatusConfig,
    locks: LicenseLocks,
}

impl LicenseStatusService {
    /// Wire the service from its collaborators and configuration.
    pub fn new(
        statuses: Arc<dyn StatusStore>,
        events: Arc<dyn EventStore>,
        lcp: Arc<dyn LicenseUpdater>,
        catalog: Arc<MessageCatalog>,
        config: &AppConfig,
    ) -> Self {
        Self {
            statuses,
            events,
            lcp,
            catalog,
            links: LinkBuilder::new(config),
            config: config.license_status.clone(),
            locks: LicenseLocks::new(),
        }
    }

    /// Create the status document for a freshly issued license.
    ///
    /// A purchase (no rights end) gets no loan horizon; a loan mirrors
    /// the rights end and computes the potential-rights end from the
    /// configured renting days.
    pub async fn create(&self, license: &LcpLicense) -> AppResult<()> {
        let status = LicenseStatus::for_license(
            license,
            self.config.register_available,
            self.config.renting_days,
            Utc::now(),
        );

        let created = self.statuses.add(&status).await?;
        info!(
            license_ref = %created.license_ref,
            status = %created.status,
            "License status created"
        );
        Ok(())
    }

    /// Read a document, lazily expiring it when the potential-rights
    /// horizon has passed while the license was still open.
    pub async fn get(
        &self,
        license_ref: &str,
        accept_language: Option<&str>,
    ) -> AppResult<LicenseStatus> {
        let mut status = self.load(license_ref).await?;

        if status.should_expire(Utc::now()) {
            status.status = Status::Expired;
            self.statuses.update(&status).await?;
            info!(license_ref = %license_ref, "License lazily expired");
        }

        self.enrich(&mut status, accept_language).await?;
        Ok(status)
    }

    /// Register a device on an open license.
    pub async fn register(
        &self,
        license_ref: &str,
        device: &DeviceParams,
        accept_language: Option<&str>,
    ) -> AppResult<LicenseStatus> {
        let _guard = self.locks.acquire(license_ref).await;
        let mut status = self.load(license_ref).await?;

        if !valid_param(&device.id, true) || !valid_param(&device.name, true) {
            return Err(AppError::bad_request(
                "device id and device name are mandatory and their maximum length is 255 characters",
            ));
        }
        if !status.status.allows_activation() {
            return Err(AppError::bad_request("License is not active"));
        }

        // Any prior event blocks re-registration, a return included:
        // activation is one-shot per device.
        if self
            .events
            .last_event_type(status.id, &device.id)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request("Device has been already registered"));
        }

        let event = Event::new(
            EventType::Register,
            status.id,
            &device.id,
            &device.name,
            Utc::now(),
        );
        self.events.add(&event).await?;

        status.updated.status = Some(event.timestamp);
        if status.status == Status::Ready {
            status.status = Status::Active;
        }
        status.device_count = Some(status.device_count.unwrap_or(0) + 1);

        self.statuses.update(&status).await?;
        info!(
            license_ref = %license_ref,
            device_id = %device.id,
            device_count = status.device_count.unwrap_or(0),
            "Device registered"
        );

        self.enrich(&mut status, accept_language).await?;
        Ok(status)
    }

    /// Return a loan. An active license becomes RETURNED, a
    /// never-activated one CANCELLED; closed statuses are denied.
    pub async fn lending_return(
        &self,
        license_ref: &str,
        device: &DeviceParams,
        accept_language: Option<&str>,
    ) -> AppResult<LicenseStatus> {
        let _guard = self.locks.acquire(license_ref).await;
        let mut status = self.load(license_ref).await?;

        if !valid_param(&device.id, false) || !valid_param(&device.name, false) {
            return Err(AppError::bad_request(
                "device id and device name maximum length is 255 characters",
            ));
        }

        let next = status.status.on_return()?;
        self.require_active_device(&status, &device.id, "Device is not activated")
            .await?;

        let event = Event::new(
            EventType::Return,
            status.id,
            &device.id,
            &device.name,
            Utc::now(),
        );
        self.events.add(&event).await?;

        self.patch_license(license_ref, event.timestamp).await?;

        status.status = next;
        status.current_end_license = Some(event.timestamp);
        status.updated.status = Some(event.timestamp);
        status.updated.license = Some(event.timestamp);

        self.statuses.update(&status).await?;
        info!(license_ref = %license_ref, status = %status.status, "License returned");

        self.enrich(&mut status, accept_language).await?;
        Ok(status)
    }

    /// Extend a loan, either to an explicit end date or by the
    /// configured number of renewal days.
    pub async fn renew(
        &self,
        license_ref: &str,
        params: &RenewParams,
        accept_language: Option<&str>,
    ) -> AppResult<LicenseStatus> {
        let _guard = self.locks.acquire(license_ref).await;
        let mut status = self.load(license_ref).await?;

        if !valid_param(&params.id, false) || !valid_param(&params.name, false) {
            return Err(AppError::bad_request(
                "device id and device name maximum length is 255 characters",
            ));
        }
        if !status.status.allows_activation() {
            return Err(AppError::bad_request("License is not active"));
        }
        self.require_active_device(&status, &params.id, "The device is not active for this license")
            .await?;

        let potential_end = status
            .potential_end()
            .ok_or_else(|| AppError::internal("Potential rights end not set"))?;

        let now = Utc::now();
        let suggested_end = suggested_renewal_end(
            params.end.as_deref(),
            status.current_end_license,
            self.config.renew_days,
        )?;

        if suggested_end > potential_end {
            return Err(AppError::forbidden(
                "attempt to renew with a date greater than the potential rights end",
            ));
        }
        if suggested_end <= now {
            return Err(AppError::forbidden("attempt to renew with a date before now"));
        }

        let event = Event::new(EventType::Renew, status.id, &params.id, &params.name, now);
        self.events.add(&event).await?;

        self.patch_license(license_ref, suggested_end).await?;

        status.current_end_license = Some(suggested_end);
        status.status = Status::Active;
        status.updated.status = Some(event.timestamp);
        status.updated.license = Some(event.timestamp);

        self.statuses.update(&status).await?;
        info!(
            license_ref = %license_ref,
            end = %suggested_end,
            "License renewed"
        );

        self.enrich(&mut status, accept_language).await?;
        Ok(status)
    }

    /// Cancel or revoke a license that was never activated.
    pub async fn cancel(&self, license_ref: &str, new_status: Status) -> AppResult<()> {
        let _guard = self.locks.acquire(license_ref).await;
        let mut status = self.load(license_ref).await?;

        if !status.status.allows_cancellation()
            || !matches!(new_status, Status::Cancelled | Status::Revoked)
        {
            return Err(AppError::bad_request(
                "The new status is not compatible with the current status",
            ));
        }

        let now = Utc::now();
        self.patch_license(license_ref, now).await?;

        status.status = new_status;
        status.current_end_license = Some(now);
        status.updated.status = Some(now);
        status.updated.license = Some(now);

        self.statuses.update(&status).await?;
        info!(license_ref = %license_ref, status = %new_status, "License terminated");
        Ok(())
    }

    /// Load a document or answer 404.
    pub(crate) async fn load(&self, license_ref: &str) -> AppResult<LicenseStatus> {
        self.statuses
            .get_by_license_ref(license_ref)
            .await?
            .ok_or_else(|| AppError::not_found("License status not found"))
    }

    /// Fill links, the localized message, and recent events; blank the
    /// device count, which never appears in responses.
    async fn enrich(
        &self,
        status: &mut LicenseStatus,
        accept_language: Option<&str>,
    ) -> AppResult<()> {
        status.links = self.links.build(status);
        status.message = self.catalog.localize(accept_language, status.status);
        status.events = self.events.list_by_status(status.id).await?;
        status.device_count = None;
        Ok(())
    }

    /// When a device id is supplied, its most recent event must keep it
    /// active; otherwise the call is rejected with `detail`.
    async fn require_active_device(
        &self,
        status: &LicenseStatus,
        device_id: &str,
        detail: &str,
    ) -> AppResult<()> {
        if device_id.is_empty() {
            return Ok(());
        }

        match self.events.last_event_type(status.id, device_id).await? {
            Some(kind) if kind.keeps_device_active() => Ok(()),
            _ => Err(AppError::bad_request(detail)),
        }
    }

    /// PATCH the remote license end date, translating a non-success
    /// answer into an error carrying the remote status code.
    async fn patch_license(&self, license_ref: &str, end: DateTime<Utc>) -> AppResult<()> {
        let code = self.lcp.update_rights_end(license_ref, end).await?;
        if !patch_succeeded(code) {
            return Err(AppError::upstream(
                code,
                format!("LCP license PATCH returned HTTP error code {code}"),
            ));
        }
        Ok(())
    }

    /// Access the store for listing queries.
    pub(crate) fn statuses(&self) -> &Arc<dyn StatusStore> {
        &self.statuses
    }

    /// Access the event log for listing queries.
    pub(crate) fn events(&self) -> &Arc<dyn EventStore> {
        &self.events
    }
}

/// Length rule shared by all device parameters: at most 255 bytes, and
/// non-empty where the parameter is mandatory.
fn valid_param(value: &str, mandatory: bool) -> bool {
    if mandatory && value.is_empty() {
        return false;
    }
    value.len() <= 255
}

/// The end date a renewal aims for: the explicit RFC 3339 `end` when
/// given, otherwise the current end extended by `renew_days`. Missing
/// prerequisites are server-side errors, not client mistakes.
fn suggested_renewal_end(
    explicit_end: Option<&str>,
    current_end: Option<DateTime<Utc>>,
    renew_days: i64,
) -> AppResult<DateTime<Utc>> {
    match explicit_end {
        Some(raw) => raw
            .parse::<DateTime<Utc>>()
            .map_err(|e| AppError::internal(format!("Failed to parse renewal end date: {e}"))),
        None => {
            if renew_days <= 0 {
                return Err(AppError::internal("renew_days not found in configuration"));
            }
            let current = current_end.ok_or_else(|| {
                AppError::internal("Current end date of the license status is not set")
            })?;
            Ok(current + Duration::days(renew_days))
        }
    }
}
