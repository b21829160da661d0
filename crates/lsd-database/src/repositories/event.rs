//! Event-log repository over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use lsd_core::error::{AppError, ErrorKind};
use lsd_core::AppResult;
use lsd_entity::event::{ActiveDevice, Event, EventType};
use lsd_entity::store::EventStore;

/// Flat row shape of the `event` table.
#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    license_status_fk: i64,
    device_id: String,
    device_name: String,
    event_time: DateTime<Utc>,
    event_type: String,
}

impl EventRow {
    fn into_model(self) -> AppResult<Event> {
        let event_type: EventType = self.event_type.parse().map_err(|_| {
            AppError::database(format!(
                "Event {} holds invalid type '{}'",
                self.id, self.event_type
            ))
        })?;

        Ok(Event {
            id: self.id,
            license_status_fk: self.license_status_fk,
            device_id: self.device_id,
            device_name: self.device_name,
            timestamp: self.event_time,
            event_type,
        })
    }
}

/// Repository for the append-only event log.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn add(&self, event: &Event) -> AppResult<Event> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO event (license_status_fk, device_id, device_name, event_time, event_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(event.license_status_fk)
        .bind(&event.device_id)
        .bind(&event.device_name)
        .bind(event.timestamp)
        .bind(event.event_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append event", e))?;

        let mut created = event.clone();
        created.id = id;
        Ok(created)
    }

    async fn list_by_status(&self, license_status_id: i64) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, license_status_fk, device_id, device_name, event_time, event_type \
             FROM event WHERE license_status_fk = $1 ORDER BY event_time, id",
        )
        .bind(license_status_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        rows.into_iter().map(EventRow::into_model).collect()
    }

    async fn last_event_type(
        &self,
        license_status_id: i64,
        device_id: &str,
    ) -> AppResult<Option<EventType>> {
        let value: Option<String> = sqlx::query_scalar(
            "SELECT event_type FROM event \
             WHERE license_status_fk = $1 AND device_id = $2 \
             ORDER BY event_time DESC, id DESC LIMIT 1",
        )
        .bind(license_status_id)
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check device status", e)
        })?;

        value
            .map(|v| {
                v.parse().map_err(|_| {
                    AppError::database(format!("Event log holds invalid type '{v}'"))
                })
            })
            .transpose()
    }

    async fn registered_devices(&self, license_status_id: i64) -> AppResult<Vec<ActiveDevice>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, license_status_fk, device_id, device_name, event_time, event_type FROM ( \
               SELECT DISTINCT ON (device_id) * FROM event \
               WHERE license_status_fk = $1 AND device_id <> '' \
               ORDER BY device_id, event_time DESC, id DESC \
             ) last WHERE event_type IN ('register', 'renew') ORDER BY event_time",
        )
        .bind(license_status_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list registered devices", e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| ActiveDevice {
                device_id: row.device_id,
                device_name: row.device_name,
                timestamp: row.event_time,
            })
            .collect())
    }
}
