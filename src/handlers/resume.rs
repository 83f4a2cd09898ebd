use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::config;
use crate::error::ApiError;
use crate::forward::ForwardRequest;
use crate::response::ProxyResponse;
use crate::AppState;

/// POST /api/resume/match-job - match a CV against a job description.
///
/// The backend hands this off to an AI service, so the call runs with the
/// extended match-job timeout instead of the default one.
pub async fn match_job_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(e) => return ApiError::malformed_input(format!("invalid JSON payload: {}", e)).into_response(),
    };

    let credential = state.sessions.resolve(&headers).await;

    let timeout = Duration::from_secs(config::config().upstream.match_job_timeout_secs);

    let result = state
        .forwarder
        .forward(
            ForwardRequest::post("/resume/match-job")
                .json(body)
                .authenticated()
                .timeout(timeout),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::ok(result).into_response()
}
