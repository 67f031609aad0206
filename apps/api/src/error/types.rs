use bucketgate_application::DeleteFailure;
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
}

impl ErrorResponse {
    pub(super) fn new(message: String) -> Self {
        Self { message }
    }
}

/// Error payload for a batch creation that stored only some records.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/partial-write-error-response.ts"
)]
pub struct PartialWriteErrorResponse {
    pub message: String,
    pub attempted: usize,
    pub succeeded: usize,
    pub ids: Vec<String>,
}

/// Error payload for an upload batch stopped at its first failure.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upload-aborted-response.ts"
)]
pub struct UploadAbortedResponse {
    pub message: String,
    pub failed_key: String,
    pub uploaded: Vec<String>,
    pub not_attempted: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-failure-response.ts"
)]
pub struct DeleteFailureResponse {
    pub key: String,
    pub message: String,
}

impl From<DeleteFailure> for DeleteFailureResponse {
    fn from(value: DeleteFailure) -> Self {
        Self {
            key: value.key,
            message: value.message,
        }
    }
}

/// Error payload for a delete batch with failed keys; deleted keys stay deleted.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-failed-response.ts"
)]
pub struct DeleteFailedResponse {
    pub message: String,
    pub attempted: usize,
    pub deleted: Vec<String>,
    pub failures: Vec<DeleteFailureResponse>,
}
