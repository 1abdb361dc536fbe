//! Contact API routes
//!
//! - `POST /api/v1/contacts` - Submit one contact (JSON or form-encoded)
//!
//! The same handler is also mounted at `POST /submit`, the path the form page
//! posts to.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::commands::{self, SubmitContactCommand, SubmitContactError};
use super::extract::ContactPayload;
use crate::api::{ApiResponse, ErrorResponse};
use crate::store::SharedStore;

/// Creates the contacts router
pub fn contacts_routes() -> Router<SharedStore> {
    Router::new().route("/", post(submit_contact))
}

/// Submit a contact
///
/// # Request Body
///
/// ```json
/// {
///   "first_name": "John",
///   "second_name": "Doe",
///   "email": "j@d.com",
///   "phone": "0123456789",
///   "eircode": "1D09AB"
/// }
/// ```
///
/// # Response
///
/// - `201 Created` - `{"success": true, "data": {"id": 1}}`
/// - `400 Bad Request` - Validation failed; `error.details` lists every message
/// - `415 Unsupported Media Type` - Body is neither JSON nor form-encoded
/// - `500 Internal Server Error` - Schema or insert failure (details are logged only)
#[tracing::instrument(skip(store, payload))]
pub async fn submit_contact(
    State(store): State<SharedStore>,
    ContactPayload(payload): ContactPayload,
) -> Result<Response, ContactApiError> {
    let command = SubmitContactCommand::from(payload);
    let response = commands::submit::handle(store.as_ref(), command).await?;

    tracing::info!(contact_id = response.id, "Contact submitted via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Error type for contact API endpoints
#[derive(Debug)]
pub struct ContactApiError(SubmitContactError);

impl From<SubmitContactError> for ContactApiError {
    fn from(err: SubmitContactError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ContactApiError {
    fn into_response(self) -> Response {
        match self.0 {
            SubmitContactError::Validation(err) => {
                tracing::warn!(errors = ?err.messages, "Contact submission rejected");
                let error = ErrorResponse::with_details(
                    "VALIDATION_ERROR",
                    "Contact failed validation",
                    json!(err.messages),
                );
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            SubmitContactError::Schema(err) => {
                tracing::error!(error = %err, "Schema check failed during contact submission");
                let error = ErrorResponse::new("INTERNAL_ERROR", "Server schema initialization error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            SubmitContactError::Store(err) => {
                tracing::error!(error = %err, "Contact insert failed");
                let error = ErrorResponse::new("INTERNAL_ERROR", "Failed to store contact");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}
