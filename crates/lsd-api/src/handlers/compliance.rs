//! Compliance-test control endpoint used by conformance tooling.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use lsd_core::AppError;

use crate::state::AppState;

/// Parameters of the compliance-test control call.
#[derive(Debug, Deserialize)]
pub struct ComplianceParams {
    /// `start` or `end`.
    pub test_stage: String,
    /// Scenario number; required for `start`.
    #[serde(default)]
    pub test_number: String,
}

/// POST /compliancetest?test_stage&test_number
pub async fn set_stage(
    State(state): State<AppState>,
    Query(params): Query<ComplianceParams>,
) -> Result<StatusCode, AppError> {
    match params.test_stage.as_str() {
        "start" => {
            if params.test_number.is_empty() {
                return Err(AppError::bad_request(
                    "test_number is required to start a compliance test",
                ));
            }
            state.compliance.start_test(&params.test_number).await;
        }
        "end" => state.compliance.end_test().await,
        other => {
            return Err(AppError::bad_request(format!(
                "Unknown test_stage '{other}', expected start or end"
            )));
        }
    }

    Ok(StatusCode::OK)
}
