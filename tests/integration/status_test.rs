//! Create, read, and cancel/revoke over the HTTP surface.

use http::StatusCode;

use lsd_core::types::content_type;
use lsd_entity::status::Status;
use lsd_entity::store::StatusStore;

use crate::helpers::{test_config, TestApp};

#[tokio::test]
async fn create_then_get_round_trips_the_document() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    let response = app.request("GET", "/licenses/lic-1/status", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get("content-type").unwrap(),
        content_type::LSD_JSON
    );

    assert_eq!(response.body["id"], "lic-1");
    assert_eq!(response.body["status"], "ready");
    assert_eq!(response.body["message"], "The license is ready");
    assert!(response.body.get("device_count").is_none());

    let rels: Vec<&str> = response.body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, vec!["license", "register", "return", "renew"]);
}

#[tokio::test]
async fn malformed_license_json_is_a_bad_request() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/licenses/",
            Some(serde_json::json!({ "issued": "not-a-date" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"].is_string());
}

#[tokio::test]
async fn unknown_license_is_a_problem_document() {
    let app = TestApp::new();
    let response = app.request("GET", "/licenses/nope/status", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers.get("content-type").unwrap(),
        content_type::PROBLEM_JSON
    );
    assert_eq!(response.body["status"], 404);
    assert!(response.body["detail"].is_string());
}

#[tokio::test]
async fn purchase_documents_offer_no_loan_actions() {
    let app = TestApp::new();
    app.create_purchase("lic-p").await;

    let response = app.request("GET", "/licenses/lic-p/status", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("potential_rights").is_none());

    let rels: Vec<&str> = response.body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, vec!["license", "register"]);
}

#[tokio::test]
async fn lazy_expiry_is_visible_in_the_store_after_a_read() {
    let mut config = test_config();
    config.license_status.renting_days = 0;
    let app = TestApp::with_config(config);

    app.create_loan("lic-old", -5).await;

    let response = app.request("GET", "/licenses/lic-old/status", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "expired");

    let stored = app
        .store
        .get_by_license_ref("lic-old")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, Status::Expired);
}

#[tokio::test]
async fn cancel_patch_terminates_a_ready_license() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    let response = app
        .request(
            "PATCH",
            "/licenses/lic-1/status",
            Some(serde_json::json!({ "status": "revoked" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = app
        .store
        .get_by_license_ref("lic-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, Status::Revoked);
    assert_eq!(app.lcp.calls().await.len(), 1);
}

#[tokio::test]
async fn cancel_patch_is_rejected_once_the_license_is_active() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;
    let response = app
        .request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "PATCH",
            "/licenses/lic-1/status",
            Some(serde_json::json!({ "status": "cancelled" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["detail"],
        "The new status is not compatible with the current status"
    );
}

#[tokio::test]
async fn compliance_mode_records_action_outcomes() {
    let file = std::env::temp_dir()
        .join(format!("lsd-compliance-it-{}", std::process::id()))
        .to_string_lossy()
        .into_owned();

    let mut config = test_config();
    config.compliance.enabled = true;
    config.compliance.file = file.clone();
    let app = TestApp::with_config(config);

    let response = app
        .request(
            "POST",
            "/compliancetest?test_stage=start&test_number=33",
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // A read of a missing license is recorded with its 404 outcome.
    app.request("GET", "/licenses/missing/status", None).await;

    let response = app
        .request("POST", "/compliancetest?test_stage=end", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // After the scenario ended, nothing further is recorded.
    app.request("GET", "/licenses/missing/status", None).await;

    let contents = std::fs::read_to_string(&file).unwrap();
    assert_eq!(contents, "33|status|404\n");
    let _ = std::fs::remove_file(&file);
}

#[tokio::test]
async fn compliance_start_requires_a_test_number() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/compliancetest?test_stage=start", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
