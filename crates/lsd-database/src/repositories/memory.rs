//! In-memory stores using a Tokio mutex, for single-node demos and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lsd_core::types::paging::DeviceFilter;
use lsd_core::{AppError, AppResult};
use lsd_entity::event::{ActiveDevice, Event, EventType};
use lsd_entity::status::LicenseStatus;
use lsd_entity::store::{EventStore, StatusStore};

/// Internal state for the memory store.
#[derive(Debug, Default)]
struct InnerState {
    /// Status documents by id.
    statuses: HashMap<i64, LicenseStatus>,
    /// Append-only event log.
    events: Vec<Event>,
    /// Next status id.
    next_status_id: i64,
    /// Next event id.
    next_event_id: i64,
}

/// In-memory implementation of both store contracts behind one mutex,
/// so a status update and its event append observe a consistent state.
///
/// Suitable for tests and single-node experiments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Protected inner state.
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for MemoryStore {
    async fn add(&self, status: &LicenseStatus) -> AppResult<LicenseStatus> {
        let mut state = self.state.lock().await;

        if state
            .statuses
            .values()
            .any(|s| s.license_ref == status.license_ref)
        {
            return Err(AppError::database(format!(
                "License status for '{}' already exists",
                status.license_ref
            )));
        }

        state.next_status_id += 1;
        let mut created = status.clone();
        created.id = state.next_status_id;
        state.statuses.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_license_ref(&self, license_ref: &str) -> AppResult<Option<LicenseStatus>> {
        let state = self.state.lock().await;
        Ok(state
            .statuses
            .values()
            .find(|s| s.license_ref == license_ref)
            .cloned())
    }

    async fn update(&self, status: &LicenseStatus) -> AppResult<()> {
        let mut state = self.state.lock().await;
        match state.statuses.get_mut(&status.id) {
            Some(existing) => {
                *existing = status.clone();
                Ok(())
            }
            None => Err(AppError::database(format!(
                "License status {} vanished during update",
                status.id
            ))),
        }
    }

    async fn list_heavy_use(&self, filter: &DeviceFilter) -> AppResult<Vec<LicenseStatus>> {
        let state = self.state.lock().await;
        let mut matching: Vec<LicenseStatus> = state
            .statuses
            .values()
            .filter(|s| s.device_count.unwrap_or(0) >= filter.devices)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.id);

        Ok(matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit() as usize)
            .collect())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn add(&self, event: &Event) -> AppResult<Event> {
        let mut state = self.state.lock().await;
        state.next_event_id += 1;
        let mut created = event.clone();
        created.id = state.next_event_id;
        state.events.push(created.clone());
        Ok(created)
    }

    async fn list_by_status(&self, license_status_id: i64) -> AppResult<Vec<Event>> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .iter()
            .filter(|e| e.license_status_fk == license_status_id)
            .cloned()
            .collect())
    }

    async fn last_event_type(
        &self,
        license_status_id: i64,
        device_id: &str,
    ) -> AppResult<Option<EventType>> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .iter()
            .filter(|e| e.license_status_fk == license_status_id && e.device_id == device_id)
            .max_by_key(|e| (e.timestamp, e.id))
            .map(|e| e.event_type))
    }

    async fn registered_devices(&self, license_status_id: i64) -> AppResult<Vec<ActiveDevice>> {
        let state = self.state.lock().await;

        let mut last_by_device: HashMap<&str, &Event> = HashMap::new();
        for event in state
            .events
            .iter()
            .filter(|e| e.license_status_fk == license_status_id && !e.device_id.is_empty())
        {
            let slot = last_by_device.entry(event.device_id.as_str()).or_insert(event);
            if (event.timestamp, event.id) > ((*slot).timestamp, (*slot).id) {
                *slot = event;
            }
        }

        let mut devices: Vec<ActiveDevice> = last_by_device
            .into_values()
            .filter(|e| e.event_type.keeps_device_active())
            .map(|e| ActiveDevice {
                device_id: e.device_id.clone(),
                device_name: e.device_name.clone(),
                timestamp: e.timestamp,
            })
            .collect();
        devices.sort_by_key(|d| d.timestamp);

        Ok(devices)
    }
}
