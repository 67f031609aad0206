use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bucketgate_application::{BatchError, DeleteFailure};
use bucketgate_core::AppError;
use serde_json::Value;

use super::{ApiError, BatchApiError};

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

#[tokio::test]
async fn storage_failures_are_internal_server_errors() {
    let response = ApiError(AppError::Storage("connection refused".to_owned())).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["message"],
        "storage error: connection refused"
    );
}

#[test]
fn application_errors_map_to_statuses() {
    let cases = [
        (AppError::Validation("bad".to_owned()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("gone".to_owned()), StatusCode::NOT_FOUND),
        (AppError::Conflict("decided".to_owned()), StatusCode::CONFLICT),
        (AppError::Unauthorized("who".to_owned()), StatusCode::UNAUTHORIZED),
        (AppError::Forbidden("no".to_owned()), StatusCode::FORBIDDEN),
        (AppError::Internal("boot".to_owned()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, status) in cases {
        assert_eq!(ApiError(error).into_response().status(), status);
    }
}

#[tokio::test]
async fn partial_write_body_lists_stored_ids() {
    let response = ApiError(AppError::PartialWrite {
        attempted: 3,
        succeeded: 1,
        ids: vec!["first".to_owned()],
    })
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["attempted"], 3);
    assert_eq!(body["succeeded"], 1);
    assert_eq!(body["ids"][0], "first");
}

#[tokio::test]
async fn aborted_upload_uses_the_status_of_its_cause() {
    let response = BatchApiError(BatchError::UploadAborted {
        failed_key: "b.txt".to_owned(),
        uploaded: vec!["a.txt".to_owned()],
        not_attempted: vec!["c.txt".to_owned()],
        source: AppError::Storage("disk full".to_owned()),
    })
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["failedKey"], "b.txt");
    assert_eq!(body["notAttempted"][0], "c.txt");
}

#[test]
fn failed_delete_batch_is_a_server_error() {
    let response = BatchApiError(BatchError::DeleteFailed {
        attempted: 2,
        deleted: vec!["a.txt".to_owned()],
        failures: vec![DeleteFailure {
            key: "b.txt".to_owned(),
            message: "storage error: timeout".to_owned(),
        }],
    })
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
