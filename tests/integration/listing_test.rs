//! Listing endpoints: heavy-use filter and registered devices.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn filter_list_returns_matching_licenses_with_link_header() {
    let app = TestApp::new();

    for i in 0..3 {
        let license_ref = format!("lic-{i}");
        app.create_loan(&license_ref, 10).await;
        app.request(
            "POST",
            &format!("/licenses/{license_ref}/register?id=D1&name=Kindle"),
            None,
        )
        .await;
    }
    // lic-2 gets a second device.
    app.request("POST", "/licenses/lic-2/register?id=D2&name=Kobo", None)
        .await;

    let response = app.request("GET", "/licenses/?devices=2", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "lic-2");
    // The usage report keeps the device count.
    assert_eq!(items[0]["device_count"], 2);

    // The echoed per_page is one above the requested page size.
    let link = response.headers.get("link").unwrap().to_str().unwrap();
    assert_eq!(
        link,
        "</licenses/?devices=2&page=2&per_page=11>; rel=\"next\"; title=\"next\""
    );
}

#[tokio::test]
async fn filter_list_emits_a_previous_link_past_the_first_page() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;
    app.request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;

    let response = app
        .request("GET", "/licenses/?devices=1&page=2&per_page=1", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Page 2 of one result is empty: no next link, only previous.
    let link = response.headers.get("link").unwrap().to_str().unwrap();
    assert_eq!(
        link,
        "</licenses/?devices=1&page=1&per_page=2>; rel=\"previous\"; title=\"previous\""
    );
}

#[tokio::test]
async fn filter_list_rejects_non_positive_parameters() {
    let app = TestApp::new();

    for query in ["devices=0", "page=0", "per_page=0"] {
        let response = app
            .request("GET", &format!("/licenses/?{query}"), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "query: {query}");
    }
}

#[tokio::test]
async fn registered_devices_lists_only_active_devices() {
    let app = TestApp::new();
    app.create_loan("lic-1", 10).await;
    app.request("POST", "/licenses/lic-1/register?id=D1&name=Kindle", None)
        .await;
    app.request("POST", "/licenses/lic-1/register?id=D2&name=Kobo", None)
        .await;

    // D1 returns the loan; its most recent event is now a return.
    app.request("PUT", "/licenses/lic-1/return?id=D1&name=Kindle", None)
        .await;

    let response = app.request("GET", "/licenses/lic-1/registered", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "lic-1");

    let devices = response.body["devices"].as_array().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["id"], "D2");
    assert_eq!(devices[0]["name"], "Kobo");
    assert!(devices[0]["timestamp"].is_string());
}

#[tokio::test]
async fn registered_devices_for_an_unknown_license_is_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/licenses/nope/registered", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
