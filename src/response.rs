use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::forward::{ForwardResult, ForwardError};

/// Wrapper mapping a forward result onto the platform response convention:
/// `{"data": ...}` with the success status, or `{"error": ...}` with the
/// status carried by the error.
#[derive(Debug)]
pub struct ProxyResponse {
    result: ForwardResult<Value>,
    success_status: StatusCode,
}

impl ProxyResponse {
    /// Successful forwards respond 200 OK
    pub fn ok(result: ForwardResult<Value>) -> Self {
        Self {
            result,
            success_status: StatusCode::OK,
        }
    }

    /// Creation routes respond 201 Created on success
    pub fn created(result: ForwardResult<Value>) -> Self {
        Self {
            result,
            success_status: StatusCode::CREATED,
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        match self.result {
            ForwardResult::Data(data) => {
                (self.success_status, Json(json!({ "data": data }))).into_response()
            }
            ForwardResult::Error(ForwardError { status, message }) => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
