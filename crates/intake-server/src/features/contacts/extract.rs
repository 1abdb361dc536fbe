//! Request body extraction for contact submissions
//!
//! The form page posts JSON, while a plain HTML form without scripting posts
//! `application/x-www-form-urlencoded`. Both decode into the same
//! [`ContactCandidate`]. Scalar JSON values are taken as text, so only a
//! malformed body or a nested value is rejected here.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use intake_common::ContactCandidate;

use crate::api::ErrorResponse;

/// A contact decoded from a JSON or form-encoded body
#[derive(Debug, Clone)]
pub struct ContactPayload(pub ContactCandidate);

fn rejection(status: StatusCode, message: String) -> Response {
    let code = match status {
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        _ => "BAD_REQUEST",
    };
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

#[async_trait]
impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(candidate) = Json::<ContactCandidate>::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            Ok(Self(candidate))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(candidate) = Form::<ContactCandidate>::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            Ok(Self(candidate))
        } else {
            tracing::debug!(%content_type, "Unsupported submission content type");
            Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse::new(
                    "UNSUPPORTED_MEDIA_TYPE",
                    "Expected application/json or application/x-www-form-urlencoded",
                )),
            )
                .into_response())
        }
    }
}
