//! Register, return, and renew over the HTTP surface.

use http::StatusCode;

use lsd_entity::status::Status;
use lsd_entity::store::StatusStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn register_transitions_ready_to_active() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    let response = app
        .request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "active");
    assert_eq!(response.body["events"][0]["type"], "register");
    assert_eq!(response.body["events"][0]["id"], "D1");
    assert!(response.body.get("device_count").is_none());

    let stored = app
        .store
        .get_by_license_ref("lic-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.device_count, Some(1));
}

#[tokio::test]
async fn register_without_a_device_id_is_rejected() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    let response = app
        .request("POST", "/licenses/lic-1/register?name=Kindle", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registering_the_same_device_twice_is_rejected() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    app.request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;
    let response = app
        .request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["detail"], "Device has been already registered");
}

#[tokio::test]
async fn return_closes_the_loan_and_second_return_is_forbidden() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;
    app.request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;

    let response = app
        .request("PUT", "/licenses/lic-1/return?id=D1&name=Kindle", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "returned");
    assert_eq!(response.body["message"], "The license has been returned");

    let response = app
        .request("PUT", "/licenses/lic-1/return?id=D1&name=Kindle", None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["detail"], "License has been already returned");
}

#[tokio::test]
async fn return_from_ready_cancels_the_license() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    let response = app.request("PUT", "/licenses/lic-1/return", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "cancelled");
}

#[tokio::test]
async fn upstream_patch_failure_propagates_the_remote_status() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;
    app.request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;

    app.lcp.respond_with(502).await;
    let response = app
        .request("PUT", "/licenses/lic-1/return?id=D1&name=Kindle", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.body["detail"],
        "LCP license PATCH returned HTTP error code 502"
    );

    // The local status did not move.
    let stored = app
        .store
        .get_by_license_ref("lic-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, Status::Active);
}

#[tokio::test]
async fn renew_extends_the_loan_by_the_configured_days() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;
    app.request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;

    let before = app
        .store
        .get_by_license_ref("lic-1")
        .await
        .unwrap()
        .unwrap();
    let old_end = before.current_end_license.unwrap();

    let response = app
        .request("PUT", "/licenses/lic-1/renew?id=D1&name=Kindle", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "active");

    let stored = app
        .store
        .get_by_license_ref("lic-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.current_end_license.unwrap(),
        old_end + chrono::Duration::days(7)
    );
}

#[tokio::test]
async fn renew_beyond_the_horizon_is_forbidden() {
    let app = TestApp::new();
    // End 25 days out, horizon 29 days out: 7 more days overshoot.
    app.create_loan("lic-1", 25).await;

    let response = app.request("PUT", "/licenses/lic-1/renew", None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn renew_with_an_explicit_past_end_is_forbidden() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;

    let past = (chrono::Utc::now() - chrono::Duration::seconds(1)).to_rfc3339();
    let response = app
        .request(
            "PUT",
            &format!("/licenses/lic-1/renew?end={}", urlencode(&past)),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

/// Percent-encode the characters RFC 3339 timestamps put in queries.
fn urlencode(raw: &str) -> String {
    raw.replace('+', "%2B").replace(':', "%3A")
}
