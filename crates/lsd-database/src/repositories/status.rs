//! License-status repository over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use lsd_core::error::{AppError, ErrorKind};
use lsd_core::types::paging::DeviceFilter;
use lsd_core::AppResult;
use lsd_entity::status::{LicenseStatus, PotentialRights, Status, Updated};
use lsd_entity::store::StatusStore;

/// Flat row shape of the `license_status` table.
#[derive(Debug, FromRow)]
struct StatusRow {
    id: i64,
    license_ref: String,
    status: String,
    updated_license: Option<DateTime<Utc>>,
    updated_status: Option<DateTime<Utc>>,
    device_count: i64,
    potential_rights_end: Option<DateTime<Utc>>,
    current_end_license: Option<DateTime<Utc>>,
}

impl StatusRow {
    fn into_model(self) -> AppResult<LicenseStatus> {
        let status: Status = self.status.parse().map_err(|_| {
            AppError::database(format!(
                "Row {} holds invalid status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(LicenseStatus {
            id: self.id,
            license_ref: self.license_ref,
            status,
            updated: Updated {
                license: self.updated_license,
                status: self.updated_status,
            },
            message: String::new(),
            links: Vec::new(),
            device_count: Some(self.device_count),
            potential_rights: self
                .potential_rights_end
                .map(|end| PotentialRights { end: Some(end) }),
            events: Vec::new(),
            current_end_license: self.current_end_license,
        })
    }
}

/// Repository for License Status Documents.
#[derive(Debug, Clone)]
pub struct StatusRepository {
    pool: PgPool,
}

impl StatusRepository {
    /// Create a new status repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStore for StatusRepository {
    async fn add(&self, status: &LicenseStatus) -> AppResult<LicenseStatus> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO license_status \
             (license_ref, status, updated_license, updated_status, device_count, \
              potential_rights_end, current_end_license) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&status.license_ref)
        .bind(status.status.as_str())
        .bind(status.updated.license)
        .bind(status.updated.status)
        .bind(status.device_count.unwrap_or(0))
        .bind(status.potential_end())
        .bind(status.current_end_license)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create license status", e)
        })?;

        let mut created = status.clone();
        created.id = id;
        Ok(created)
    }

    async fn get_by_license_ref(&self, license_ref: &str) -> AppResult<Option<LicenseStatus>> {
        let row = sqlx::query_as::<_, StatusRow>(
            "SELECT id, license_ref, status, updated_license, updated_status, device_count, \
             potential_rights_end, current_end_license \
             FROM license_status WHERE license_ref = $1",
        )
        .bind(license_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find license status", e)
        })?;

        row.map(StatusRow::into_model).transpose()
    }

    async fn update(&self, status: &LicenseStatus) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE license_status SET status = $2, updated_license = $3, updated_status = $4, \
             device_count = $5, potential_rights_end = $6, current_end_license = $7 \
             WHERE id = $1",
        )
        .bind(status.id)
        .bind(status.status.as_str())
        .bind(status.updated.license)
        .bind(status.updated.status)
        .bind(status.device_count.unwrap_or(0))
        .bind(status.potential_end())
        .bind(status.current_end_license)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update license status", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::database(format!(
                "License status {} vanished during update",
                status.id
            )));
        }
        Ok(())
    }

    async fn list_heavy_use(&self, filter: &DeviceFilter) -> AppResult<Vec<LicenseStatus>> {
        let rows = sqlx::query_as::<_, StatusRow>(
            "SELECT id, license_ref, status, updated_license, updated_status, device_count, \
             potential_rights_end, current_end_license \
             FROM license_status WHERE device_count >= $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(filter.devices)
        .bind(filter.limit())
        .bind(filter.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list license statuses", e)
        })?;

        rows.into_iter().map(StatusRow::into_model).collect()
    }
}
