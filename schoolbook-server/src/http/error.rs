//! API error types with IntoResponse
//!
//! Every error becomes a JSON body `{"message": ...}`. Server-side failures
//! are logged before responding.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schoolbook_core::ValidationError;
use serde_json::json;

use crate::error::StorageError;
use crate::submission::SubmissionError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Required field or image missing (400)
    Validation(ValidationError),

    /// Filesystem or database failure (500, logged)
    Storage(StorageError),

    /// Multipart body could not be read; status comes from the parser
    Multipart(MultipartError),

    /// Anything else (500, logged)
    Unknown { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Unknown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart(e) => e.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Storage(e) => e.to_string(),
            Self::Multipart(e) => e.body_text(),
            Self::Unknown { message } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            Self::Validation(e) => {
                tracing::debug!(fields = ?e.fields(), "Rejected submission");
            }
            _ if status.is_server_error() => {
                tracing::error!(status = status.as_u16(), "Request failed: {}", message);
            }
            _ => {
                tracing::warn!(status = status.as_u16(), "Request failed: {}", message);
            }
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Validation(e) => Self::Validation(e),
            SubmissionError::Storage(e) => Self::Storage(e),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::Multipart(e)
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        Self::Unknown {
            message: e.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400_with_fixed_message() {
        let err = ApiError::Validation(ValidationError::MissingFields {
            fields: vec!["image"],
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Missing required fields" })
        );
    }

    #[tokio::test]
    async fn storage_error_is_500_with_message() {
        let err = ApiError::Storage(StorageError::Unavailable("disk full".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("disk full"));
    }

    #[tokio::test]
    async fn unknown_error_is_500() {
        let err = ApiError::Unknown {
            message: "boom".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "boom");
    }
}
