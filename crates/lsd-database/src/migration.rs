//! Schema migration runner.
//!
//! The persisted state is two tables: `license_status`, one row per
//! Status Document, and `event`, the append-only transaction log with a
//! foreign key to its document. The migration files are embedded from
//! the workspace `migrations/` directory at compile time.

use sqlx::PgPool;
use tracing::info;

use lsd_core::error::{AppError, ErrorKind};

/// Bring the `license_status` and `event` tables up to date.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        pending_or_applied = migrator.migrations.len(),
        "Checking schema migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!("license_status and event tables are up to date");
    Ok(())
}
