//! Runner API Handler
//!
//! Runs user code on the execution service and waits for the result.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use blaze_core::dto::envelope::Envelope;
use blaze_core::dto::run::{RunRequest, RunResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::identity::Caller;

/// POST /api/runners
/// Submit code, poll until it finishes, return its output
pub async fn run_code(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<RunResponse>>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    tracing::info!(
        caller = ?caller.id(),
        "Running code (language: {})",
        req.language.as_deref().unwrap_or("<none>")
    );

    let cancel = state.shutdown.child_token();
    let result = state.poller.submit(req, &cancel).await?;

    Ok(Json(Envelope::ok(RunResponse::from(result))))
}
