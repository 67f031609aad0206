use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bucketgate_application::BatchError;
use bucketgate_core::AppError;

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    DeleteFailedResponse, DeleteFailureResponse, ErrorResponse, PartialWriteErrorResponse,
    UploadAbortedResponse,
};

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = self.0.to_string();

        match self.0 {
            AppError::PartialWrite {
                attempted,
                succeeded,
                ids,
            } => (
                status,
                Json(PartialWriteErrorResponse {
                    message,
                    attempted,
                    succeeded,
                    ids,
                }),
            )
                .into_response(),
            _ => (status, Json(ErrorResponse::new(message))).into_response(),
        }
    }
}

/// HTTP error wrapper for multi-object batches.
#[derive(Debug)]
pub struct BatchApiError(pub BatchError);

impl From<BatchError> for BatchApiError {
    fn from(value: BatchError) -> Self {
        Self(value)
    }
}

impl From<AppError> for BatchApiError {
    fn from(value: AppError) -> Self {
        Self(BatchError::Request(value))
    }
}

impl IntoResponse for BatchApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();

        match self.0 {
            BatchError::Request(error) => ApiError(error).into_response(),
            BatchError::UploadAborted {
                failed_key,
                uploaded,
                not_attempted,
                source,
            } => (
                status_for(&source),
                Json(UploadAbortedResponse {
                    message,
                    failed_key,
                    uploaded,
                    not_attempted,
                }),
            )
                .into_response(),
            BatchError::DeleteFailed {
                attempted,
                deleted,
                failures,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteFailedResponse {
                    message,
                    attempted,
                    deleted,
                    failures: failures
                        .into_iter()
                        .map(DeleteFailureResponse::from)
                        .collect(),
                }),
            )
                .into_response(),
        }
    }
}

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::PartialWrite { .. } | AppError::Storage(_) | AppError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
