//! Shared test harness: the service wired to in-memory stores and the
//! mock LCP client.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};

use lsd_core::config::{
    AppConfig, ComplianceConfig, DatabaseConfig, LcpServerConfig, LcpUpdateAuth,
    LicenseStatusConfig, LocalizationConfig, LoggingConfig, LsdServerConfig, ServerConfig,
};
use lsd_database::repositories::MemoryStore;
use lsd_entity::license::{LcpLicense, LicenseRights};
use lsd_lcp::MockLcpClient;
use lsd_service::{LicenseStatusService, MessageCatalog};

/// Service plus handles on its fakes for direct inspection.
pub struct TestHarness {
    pub service: LicenseStatusService,
    pub store: MemoryStore,
    pub lcp: Arc<MockLcpClient>,
}

/// The end-to-end scenario configuration: every action enabled,
/// `renting_days = 30`, `renew_days = 7`.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 1,
            connect_timeout_seconds: 1,
        },
        license_status: LicenseStatusConfig {
            register_available: true,
            return_available: true,
            renew_available: true,
            renting_days: 30,
            renew_days: 7,
            localization: LocalizationConfig::default(),
        },
        lsd_server: LsdServerConfig {
            public_base_url: "https://lsd.example.org".to_string(),
            license_link_url: None,
        },
        lcp_server: LcpServerConfig {
            public_base_url: "https://lcp.example.org".to_string(),
        },
        lcp_update_auth: LcpUpdateAuth::default(),
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
        compliance: ComplianceConfig::default(),
    }
}

/// Build a harness with the given configuration.
pub fn harness_with(config: AppConfig) -> TestHarness {
    let store = MemoryStore::new();
    let lcp = Arc::new(MockLcpClient::new());

    let mut en = HashMap::new();
    for (status, message) in [
        ("ready", "The license is ready"),
        ("active", "The license is active"),
        ("returned", "The license has been returned"),
        ("expired", "The license has expired"),
        ("cancelled", "The license has been cancelled"),
        ("revoked", "The license has been revoked"),
    ] {
        en.insert(status.to_string(), message.to_string());
    }
    let mut catalogs = HashMap::new();
    catalogs.insert("en".to_string(), en);
    let catalog = Arc::new(MessageCatalog::from_catalogs(catalogs, "en"));

    let service = LicenseStatusService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        lcp.clone(),
        catalog,
        &config,
    );

    TestHarness {
        service,
        store,
        lcp,
    }
}

/// Build a harness with the scenario defaults.
pub fn harness() -> TestHarness {
    harness_with(test_config())
}

/// A loan issued yesterday and ending `days_from_now` days in the
/// future, so renewal windows sit ahead of the wall clock.
pub fn loan_license(id: &str, days_from_now: i64) -> LcpLicense {
    LcpLicense {
        id: id.to_string(),
        issued: Utc::now() - Duration::days(1),
        rights: Some(LicenseRights {
            end: Some(Utc::now() + Duration::days(days_from_now)),
        }),
    }
}

/// A purchase: no rights end.
pub fn purchase_license(id: &str) -> LcpLicense {
    LcpLicense {
        id: id.to_string(),
        issued: Utc::now() - Duration::days(1),
        rights: None,
    }
}
