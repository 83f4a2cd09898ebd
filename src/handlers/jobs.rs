use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::forward::ForwardRequest;
use crate::response::ProxyResponse;
use crate::AppState;

/// GET /api/jobs - list all job postings
pub async fn jobs_get(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(ForwardRequest::get("/jobs").authenticated(), credential.as_ref())
        .await;

    ProxyResponse::ok(result)
}

/// GET /api/jobs/:id - show a single job posting
pub async fn job_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    // A non-numeric id must still come back as a JSON error body
    let Path(id) = match id {
        Ok(p) => p,
        Err(e) => return ApiError::malformed_input(format!("invalid job id: {}", e)).into_response(),
    };

    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::get(format!("/jobs/{}", id)).authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::ok(result).into_response()
}
