use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::forward::ForwardRequest;
use crate::response::ProxyResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /api/community/posts - paginated feed
pub async fn posts_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PostsQuery>, QueryRejection>,
) -> Response {
    // A malformed query string must still come back as a JSON error body
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return ApiError::malformed_input(format!("invalid query string: {}", e)).into_response(),
    };

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::get(format!("/community/posts?page={}&limit={}", page, limit))
                .authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::ok(result).into_response()
}

/// POST /api/community/posts - create a post. Responds 201 on success.
pub async fn post_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(e) => return ApiError::malformed_input(format!("invalid JSON payload: {}", e)).into_response(),
    };

    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::post("/community/posts").json(body).authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::created(result).into_response()
}

/// GET /api/community/posts/:id - show a single post
pub async fn post_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::get(format!("/community/posts/{}", id)).authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::ok(result)
}

/// POST /api/community/posts/:id/comments - comment on a post. Responds 201
/// on success.
pub async fn comment_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(p) => p,
        Err(e) => return ApiError::malformed_input(format!("invalid JSON payload: {}", e)).into_response(),
    };

    let credential = state.sessions.resolve(&headers).await;

    let result = state
        .forwarder
        .forward(
            ForwardRequest::post(format!("/community/posts/{}/comments", id))
                .json(body)
                .authenticated(),
            credential.as_ref(),
        )
        .await;

    ProxyResponse::created(result).into_response()
}
