//! Request handlers, organized by concern.

pub mod compliance;
pub mod health;
pub mod lending;
pub mod listing;
pub mod status;

use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::HeaderMap;

/// The raw Accept-Language header, if the client sent one.
pub(crate) fn accept_language(headers: &HeaderMap) -> Option<&str> {
    headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok())
}
