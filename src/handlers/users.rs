use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};

use crate::forward::ForwardRequest;
use crate::response::ProxyResponse;
use crate::AppState;

/// GET /api/users/:id/cv - fetch the stored CV data for a user
pub async fn user_cv_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::get(format!("/users/{}/cv", id)).authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::ok(result)
}
