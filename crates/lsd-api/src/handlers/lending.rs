//! Loan-action handlers: register, return, renew.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

use lsd_core::AppError;
use lsd_service::{DeviceParams, RenewParams};

use crate::state::AppState;

use super::accept_language;
use super::status::status_document;

/// POST /licenses/:key/register?id&name
pub async fn register(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(device): Query<DeviceParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let doc = state
        .service
        .register(&key, &device, accept_language(&headers))
        .await?;
    Ok(status_document(&doc))
}

/// PUT /licenses/:key/return?id&name
pub async fn lending_return(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(device): Query<DeviceParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let doc = state
        .service
        .lending_return(&key, &device, accept_language(&headers))
        .await?;
    Ok(status_document(&doc))
}

/// PUT /licenses/:key/renew?id&name&end
pub async fn renew(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<RenewParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let doc = state
        .service
        .renew(&key, &params, accept_language(&headers))
        .await?;
    Ok(status_document(&doc))
}
