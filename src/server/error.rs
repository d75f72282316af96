//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::contact::FieldError;
use crate::content::ContentError;

/// Envelope shared by every JSON endpoint that reports success
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        ApiResponse {
            success: true,
            error: None,
            details: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        message: String,
        details: Option<Vec<FieldError>>,
    },
    NotFound(String),
    Internal,
    Content(ContentError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(details: Vec<FieldError>) -> Self {
        ApiError::BadRequest {
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        ApiError::Content(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::BadRequest { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                None,
            ),
            ApiError::Content(err) if err.is_not_found() => {
                tracing::debug!("{}", err);
                (StatusCode::NOT_FOUND, "Not found".to_string(), None)
            }
            ApiError::Content(err) => {
                tracing::error!("Content error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ApiResponse {
            success: false,
            error: Some(message),
            details,
        };

        (status, Json(body)).into_response()
    }
}
