//! Contact form endpoint

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use super::error::{ApiError, ApiResponse};
use super::AppState;
use crate::contact::{honeypot_triggered, parse_submission};
use crate::relay::format_contact_message;

/// POST /api/contact
///
/// The body is read raw so that malformed JSON maps to our own 400 response
/// instead of axum's extractor rejection.
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::bad_request("Invalid JSON payload"))?;

    if honeypot_triggered(&payload) {
        tracing::info!("Rejected contact submission: honeypot filled");
        return Err(ApiError::bad_request("Spam detected"));
    }

    let submission = parse_submission(&payload).map_err(ApiError::validation)?;

    let text = format_contact_message(&submission);
    if let Err(e) = state.relay.send(&text).await {
        tracing::error!("Contact form submission failed: {}", e);
        return Err(ApiError::Internal);
    }

    tracing::info!(service = %submission.service, "Contact submission relayed");
    Ok(Json(ApiResponse::ok()))
}
