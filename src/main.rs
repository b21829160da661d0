//! lsd-server binary.
//!
//! Startup order matters: configuration first (it names the message
//! catalogs and the LCP endpoint), then tracing, then the database and
//! its schema, and finally the API state — which loads every language
//! catalog and opens the compliance sink before the first request.

use lsd_core::config::{AppConfig, LoggingConfig};
use lsd_core::error::AppError;
use lsd_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("LSD_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot start without configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);
    tracing::info!(env = %env, "Starting LSD server");

    if let Err(e) = serve(config).await {
        tracing::error!(error = %e, "LSD server stopped");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured
/// level; the format switch picks JSON for log shippers.
fn init_tracing(logging: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(true).init();
    }
}

/// Prepare PostgreSQL and hand off to the API crate, which assembles
/// the repositories, the LCP client, the message catalogs, and the
/// compliance sink around the router.
async fn serve(config: AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    lsd_database::migration::run_migrations(db.pool()).await?;

    lsd_api::app::run_server(config, db.into_pool()).await
}
