//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::summarizing::SummarizingError;

/// Message shown for every pipeline failure; the cause is only logged.
pub const SUMMARY_FAILED_MESSAGE: &str = "The summary request failed. Please try again.";

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Summary failed: {0}")]
    SummaryFailed(#[from] SummarizingError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail.clone(),
            ),
            ApiError::SummaryFailed(err) => {
                tracing::error!(error = %err, "Summary request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SUMMARY_FAILED",
                    SUMMARY_FAILED_MESSAGE.to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::pipeline::extraction::ExtractionError;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn bad_request_returns_400_with_detail() {
        let response = ApiError::BadRequest("Unknown model".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "Unknown model");
    }

    #[tokio::test]
    async fn summary_failures_share_one_generic_message() {
        let errors = vec![
            SummarizingError::MissingApiKey,
            SummarizingError::Api {
                status: 429,
                body: "quota exceeded".into(),
            },
            SummarizingError::Extraction {
                filename: "scan.png".into(),
                source: ExtractionError::UnsupportedFormat("image/png".into()),
            },
        ];

        for err in errors {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "SUMMARY_FAILED");
            assert_eq!(json["error"]["message"], SUMMARY_FAILED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("worker panicked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
