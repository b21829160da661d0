//! Application bootstrap — wires repositories, collaborators, and the
//! service into the router and runs the server.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use lsd_core::config::AppConfig;
use lsd_core::AppError;
use lsd_database::repositories::{EventRepository, StatusRepository};
use lsd_lcp::HttpLcpClient;
use lsd_service::{ComplianceAudit, LicenseStatusService, MessageCatalog};

use crate::router::build_router;
use crate::state::AppState;

/// Build the application state over PostgreSQL-backed stores.
pub fn build_state(config: AppConfig, pool: PgPool) -> Result<AppState, AppError> {
    let statuses = Arc::new(StatusRepository::new(pool.clone()));
    let events = Arc::new(EventRepository::new(pool));
    let lcp = Arc::new(HttpLcpClient::new(
        &config.lcp_server,
        &config.lcp_update_auth,
    )?);
    let catalog = Arc::new(MessageCatalog::load(&config.license_status.localization)?);
    info!(
        languages = ?config.license_status.localization.languages,
        default = %config.license_status.localization.default_language,
        "Message catalogs loaded"
    );

    let compliance = Arc::new(ComplianceAudit::new(config.compliance.clone()));
    if config.compliance.enabled {
        info!(file = %config.compliance.file, "Compliance audit sink enabled");
    }

    let service = Arc::new(LicenseStatusService::new(
        statuses, events, lcp, catalog, &config,
    ));

    Ok(AppState {
        config: Arc::new(config),
        service,
        compliance,
    })
}

/// Run the HTTP server until the process is stopped.
pub async fn run_server(config: AppConfig, pool: PgPool) -> Result<(), AppError> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| AppError::configuration(format!("Invalid bind address: {e}")))?;

    let state = build_state(config, pool)?;
    let router = build_router(state);

    info!(addr = %addr, "LSD server listening");

    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
