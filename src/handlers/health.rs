use axum::{extract::State, response::IntoResponse};

use crate::forward::ForwardRequest;
use crate::response::ProxyResponse;
use crate::AppState;

/// GET /health - proxy the backend health probe (public, no credential)
pub async fn health_get(State(state): State<AppState>) -> impl IntoResponse {
    let result = state.forwarder.forward(ForwardRequest::get("/health"), None).await;
    ProxyResponse::ok(result)
}
