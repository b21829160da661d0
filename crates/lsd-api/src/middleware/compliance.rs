//! Loan-action outcome middleware.
//!
//! Every loan action passes through here once, after its handler ran:
//! the outcome is logged with its action name, and recorded in the
//! audit file while a conformance scenario is running. Doing both in
//! one place guarantees the log and the audit file agree on what the
//! client was told. Non-action routes (creation, listings, health) are
//! covered by the tracing layer alone.

use std::time::Instant;

use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use lsd_service::compliance;

use crate::state::AppState;

/// Log and audit every action route outcome.
pub async fn compliance_audit<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    if let Some(action) = action_for(&method, &path) {
        let outcome = response.status().as_u16();
        info!(
            action = action,
            license = extract_license_ref(&path).unwrap_or(""),
            outcome = outcome,
            elapsed_ms = %started.elapsed().as_millis(),
            "Loan action completed"
        );
        state.compliance.record(action, outcome).await;
    }

    response
}

/// Map a request to its audit action name. Listing and creation routes
/// are not part of the conformance scenarios.
fn action_for(method: &Method, path: &str) -> Option<&'static str> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["licenses", _, "status"] if method == Method::GET => Some(compliance::LICENSE_STATUS),
        ["licenses", _, "status"] if method == Method::PATCH => {
            Some(compliance::CANCEL_REVOKE_LICENSE)
        }
        ["licenses", _, "register"] if method == Method::POST => {
            Some(compliance::REGISTER_DEVICE)
        }
        ["licenses", _, "return"] if method == Method::PUT => Some(compliance::RETURN_LICENSE),
        ["licenses", _, "renew"] if method == Method::PUT => Some(compliance::RENEW_LICENSE),
        _ => None,
    }
}

/// The license reference of an action path, for log correlation.
fn extract_license_ref(path: &str) -> Option<&str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match segments.next() {
        Some("licenses") => segments.next(),
        _ => None,
    }
}
