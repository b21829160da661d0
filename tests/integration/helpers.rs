//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use chrono::{Duration, Utc};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use lsd_api::router::build_router;
use lsd_api::state::AppState;
use lsd_core::config::{
    AppConfig, ComplianceConfig, DatabaseConfig, LcpServerConfig, LcpUpdateAuth,
    LicenseStatusConfig, LocalizationConfig, LoggingConfig, LsdServerConfig, ServerConfig,
};
use lsd_database::repositories::MemoryStore;
use lsd_lcp::MockLcpClient;
use lsd_service::{ComplianceAudit, LicenseStatusService, MessageCatalog};

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Store handle for direct state inspection.
    pub store: MemoryStore,
    /// Scriptable LCP collaborator.
    pub lcp: Arc<MockLcpClient>,
}

/// Scenario configuration: every action on, 30 renting days, 7 renew
/// days.
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

impl TestApp {
    /// Build the app with the scenario defaults.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Build the app over in-memory stores and the mock LCP client.
    pub fn with_config(config: AppConfig) -> Self {
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

        let compliance = Arc::new(ComplianceAudit::new(config.compliance.clone()));
        let service = Arc::new(LicenseStatusService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            lcp.clone(),
            catalog,
            &config,
        ));

        let state = AppState {
            config: Arc::new(config),
            service,
            compliance,
        };

        Self {
            router: build_router(state),
            store,
            lcp,
        }
    }

    /// Make an HTTP request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Accept-Language", "en")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = hyper::body::to_bytes(response.into_body())
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// POST a freshly issued loan license ending `days_from_now` days
    /// out; returns its reference.
    pub async fn create_loan(&self, license_ref: &str, days_from_now: i64) {
        let body = serde_json::json!({
            "id": license_ref,
            "issued": Utc::now() - Duration::days(1),
            "rights": { "end": Utc::now() + Duration::days(days_from_now) },
        });
        let response = self.request("POST", "/licenses/", Some(body)).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    /// POST a purchase license (no rights end).
    pub async fn create_purchase(&self, license_ref: &str) {
        let body = serde_json::json!({
            "id": license_ref,
            "issued": Utc::now() - Duration::days(1),
        });
        let response = self.request("POST", "/licenses/", Some(body)).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when the body is empty or not JSON).
    pub body: Value,
}
