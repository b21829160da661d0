//! Listing handlers: heavy-use licenses and registered devices.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use lsd_core::types::paging::DeviceFilter;
use lsd_core::AppError;

use crate::state::AppState;

/// GET /licenses/?devices&page&per_page
///
/// Reports licenses registered on at least `devices` devices, in id
/// order, with RFC 5988 pagination in the `Link` header. The `per_page`
/// echoed in the header is `per_page + 1`, a wire quirk kept for
/// conformance-tool compatibility.
pub async fn filter_statuses(
    State(state): State<AppState>,
    Query(filter): Query<DeviceFilter>,
) -> Result<Response, AppError> {
    let statuses = state.service.list_heavy_use(&filter).await?;

    let mut headers = HeaderMap::new();
    if let Some(link) = pagination_links(&filter, statuses.is_empty()) {
        if let Ok(value) = HeaderValue::from_str(&link) {
            headers.insert(header::LINK, value);
        }
    }

    Ok((StatusCode::OK, headers, Json(statuses)).into_response())
}

/// GET /licenses/:key/registered
pub async fn registered_devices(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let devices = state.service.registered_devices(&key).await?;
    Ok(Json(devices).into_response())
}

/// The `Link` header value for a result page: `next` whenever the page
/// is non-empty, `previous` past the first page.
fn pagination_links(filter: &DeviceFilter, empty: bool) -> Option<String> {
    let echoed_per_page = filter.per_page + 1;
    let mut parts = Vec::new();

    if !empty {
        parts.push(format!(
            "</licenses/?devices={}&page={}&per_page={}>; rel=\"next\"; title=\"next\"",
            filter.devices,
            filter.page + 1,
            echoed_per_page
        ));
    }
    if filter.page > 1 {
        parts.push(format!(
            "</licenses/?devices={}&page={}&per_page={}>; rel=\"previous\"; title=\"previous\"",
            filter.devices,
            filter.page - 1,
            echoed_per_page
        ));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
