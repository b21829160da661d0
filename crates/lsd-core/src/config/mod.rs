//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The merged `AppConfig` is immutable for the process lifetime
//! and is passed into handlers through shared state, never read from
//! globals at call time.

pub mod compliance;
pub mod database;
pub mod license_status;
pub mod logging;
pub mod server;
pub mod servers;

use serde::{Deserialize, Serialize};

pub use self::compliance::ComplianceConfig;
pub use self::database::DatabaseConfig;
pub use self::license_status::{LicenseStatusConfig, LocalizationConfig};
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;
pub use self::servers::{LcpServerConfig, LcpUpdateAuth, LsdServerConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// License-status behavior: action availability, loan horizons,
    /// localization catalogs.
    pub license_status: LicenseStatusConfig,
    /// Public base URL and license-link template of this LSD server.
    pub lsd_server: LsdServerConfig,
    /// Public base URL of the sibling LCP license server.
    pub lcp_server: LcpServerConfig,
    /// HTTP Basic credentials for the LCP license PATCH.
    #[serde(default)]
    pub lcp_update_auth: LcpUpdateAuth,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Compliance-test audit settings.
    #[serde(default)]
    pub compliance: ComplianceConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `LSD`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LSD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
