use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::forward::ForwardRequest;
use crate::response::ProxyResponse;
use crate::AppState;

/// POST /api/job-applications - submit a job application on behalf of the
/// signed-in user. Responds 201 on success.
pub async fn job_application_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    // Reject malformed payloads before any upstream work
    let Json(body) = match payload {
        Ok(p) => p,
        Err(e) => return ApiError::malformed_input(format!("invalid JSON payload: {}", e)).into_response(),
    };

    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::post("/job-applications").json(body).authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::created(result).into_response()
}
