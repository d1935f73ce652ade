use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mq::MqError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Example not found")]
    pub error: String,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `QUEUE_NOT_CONFIGURED`, `QUEUE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// No queue publisher is available (disabled, or unreachable at startup).
    QueueNotConfigured,
    /// Publishing to the queue failed. Contains the broker error detail.
    QueueUnavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    code: "VALIDATION_ERROR",
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: msg,
                    code: "NOT_FOUND",
                },
            ),
            AppError::QueueNotConfigured => {
                tracing::error!("Job queue is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Queue not configured".into(),
                        code: "QUEUE_NOT_CONFIGURED",
                    },
                )
            }
            AppError::QueueUnavailable(detail) => {
                tracing::error!("Queue error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Queue unavailable".into(),
                        code: "QUEUE_UNAVAILABLE",
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "An unexpected error occurred".into(),
                        code: "INTERNAL_ERROR",
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MqError> for AppError {
    fn from(err: MqError) -> Self {
        AppError::QueueUnavailable(err.to_string())
    }
}
