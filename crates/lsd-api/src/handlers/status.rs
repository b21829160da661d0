//! Status-document handlers: create, read, cancel/revoke.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use lsd_core::types::content_type;
use lsd_core::AppError;
use lsd_entity::license::LcpLicense;
use lsd_entity::status::{LicenseStatus, Status};

use crate::state::AppState;

use super::accept_language;

/// Encode a Status Document with its dedicated media type.
pub(crate) fn status_document(doc: &LicenseStatus) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type::LSD_JSON)],
        Json(doc),
    )
        .into_response()
}

/// POST /licenses/
///
/// Called by the LCP sibling when it issues a license. Creates the
/// status document; answers 201 with no body.
pub async fn create(
    State(state): State<AppState>,
    body: String,
) -> Result<StatusCode, AppError> {
    let license: LcpLicense = serde_json::from_str(&body)
        .map_err(|e| AppError::bad_request(format!("Failed to decode license: {e}")))?;

    state.service.create(&license).await?;
    Ok(StatusCode::CREATED)
}

/// GET /licenses/:key/status
pub async fn get_status(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let doc = state.service.get(&key, accept_language(&headers)).await?;
    Ok(status_document(&doc))
}

/// Body of a cancel/revoke PATCH: the desired terminal status.
#[derive(Debug, Deserialize)]
pub struct StatusPatch {
    /// `cancelled` or `revoked`.
    pub status: Status,
}

/// PATCH /licenses/:key/status
pub async fn cancel(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: String,
) -> Result<StatusCode, AppError> {
    let patch: StatusPatch = serde_json::from_str(&body)
        .map_err(|e| AppError::bad_request(format!("Failed to decode status patch: {e}")))?;

    state.service.cancel(&key, patch.status).await?;
    Ok(StatusCode::OK)
}
