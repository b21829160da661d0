//! Store contracts implemented by the persistence layer.
//!
//! Defined here so that services depend on the contract, not on a
//! concrete backend. `lsd-database` provides the PostgreSQL
//! implementations and an in-memory variant for single-node/test use.

use async_trait::async_trait;

use lsd_core::types::paging::DeviceFilter;
use lsd_core::AppResult;

use crate::event::{ActiveDevice, Event, EventType};
use crate::status::LicenseStatus;

/// Persistence contract for License Status Documents.
#[async_trait]
pub trait StatusStore: Send + Sync + 'static {
    /// Insert a new document and return it with its assigned id.
    async fn add(&self, status: &LicenseStatus) -> AppResult<LicenseStatus>;

    /// Look up a document by its license reference.
    async fn get_by_license_ref(&self, license_ref: &str) -> AppResult<Option<LicenseStatus>>;

    /// Persist the mutable fields of an existing document.
    async fn update(&self, status: &LicenseStatus) -> AppResult<()>;

    /// Documents whose device count reached `filter.devices`, ordered by
    /// id ascending, paginated.
    async fn list_heavy_use(&self, filter: &DeviceFilter) -> AppResult<Vec<LicenseStatus>>;
}

/// Persistence contract for the append-only event log.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    /// Append an event and return it with its assigned id.
    async fn add(&self, event: &Event) -> AppResult<Event>;

    /// All events of a document, oldest first.
    async fn list_by_status(&self, license_status_id: i64) -> AppResult<Vec<Event>>;

    /// The type of the most recent event recorded for `(document, device)`,
    /// or `None` when the device was never seen. This is the authority on
    /// whether a device is currently registered.
    async fn last_event_type(
        &self,
        license_status_id: i64,
        device_id: &str,
    ) -> AppResult<Option<EventType>>;

    /// Devices whose most recent event keeps them active, with that
    /// event's timestamp.
    async fn registered_devices(&self, license_status_id: i64) -> AppResult<Vec<ActiveDevice>>;
}
