//! API response types
//!
//! Every JSON body carries a `success` flag. Successful responses put their
//! payload under `data`; failures carry an `error` object with a machine code,
//! a message, and optional details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let body = serde_json::to_value(ApiResponse::success(json!({ "id": 3 }))).unwrap();
        assert_eq!(body, json!({ "success": true, "data": { "id": 3 } }));
    }

    #[test]
    fn test_error_without_details_omits_field() {
        let body = serde_json::to_value(ErrorResponse::new("INTERNAL_ERROR", "boom")).unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": { "code": "INTERNAL_ERROR", "message": "boom" } })
        );
    }

    #[test]
    fn test_error_with_details() {
        let body = serde_json::to_value(ErrorResponse::with_details(
            "VALIDATION_ERROR",
            "Invalid contact",
            json!(["Submission: Missing email"]),
        ))
        .unwrap();
        assert_eq!(body["error"]["details"][0], "Submission: Missing email");
    }
}
