use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

// ========== API RESPONSE ENVELOPE ==========

/// Uniform body for every endpoint.
///
/// Success: `{ "status": "ok", "statusCode": 201, "result": ... }`
/// Error:   `{ "status": "error", "statusCode": 404, "message": "..." }`
///
/// The HTTP status line always carries the same code as `statusCode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: StatusCode, result: T) -> Self {
        Self {
            status: "ok",
            status_code: status.as_u16(),
            result: Some(result),
            message: None,
        }
    }

    pub fn ok(result: T) -> Self {
        Self::success(StatusCode::OK, result)
    }

    pub fn created(result: T) -> Self {
        Self::success(StatusCode::CREATED, result)
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            status_code: status.as_u16(),
            result: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
