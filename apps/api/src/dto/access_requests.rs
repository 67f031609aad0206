use bucketgate_application::{BucketRequestItem, CreateAccessRequestsInput};
use bucketgate_domain::AccessRequest;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One bucket named in an access request submission.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bucket-request-dto.ts"
)]
pub struct BucketRequestDto {
    pub name: String,
    pub region: String,
}

/// Incoming payload for access request creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-access-requests-request.ts"
)]
pub struct CreateAccessRequestsRequest {
    pub buckets: Vec<BucketRequestDto>,
    pub reason: String,
    pub duration_in_minutes: i64,
}

impl From<CreateAccessRequestsRequest> for CreateAccessRequestsInput {
    fn from(value: CreateAccessRequestsRequest) -> Self {
        Self {
            buckets: value
                .buckets
                .into_iter()
                .map(|bucket| BucketRequestItem {
                    bucket_name: bucket.name,
                    region: bucket.region,
                })
                .collect(),
            reason: value.reason,
            duration_minutes: value.duration_in_minutes,
        }
    }
}

/// Result of a fully successful access request creation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-access-requests-response.ts"
)]
pub struct CreateAccessRequestsResponse {
    pub success: bool,
    pub count: usize,
    pub ids: Vec<String>,
}

/// Incoming payload for denying a request.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/deny-access-request-request.ts"
)]
pub struct DenyAccessRequestRequest {
    pub reason: String,
}

/// API representation of an access request.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-request-response.ts"
)]
pub struct AccessRequestResponse {
    pub id: String,
    pub bucket_name: String,
    pub region: String,
    pub reason: String,
    pub duration_in_minutes: u32,
    pub status: String,
    pub requested_at: String,
    pub expires_at: Option<String>,
    pub denial_reason: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
    pub user_image: Option<String>,
}

impl From<AccessRequest> for AccessRequestResponse {
    fn from(value: AccessRequest) -> Self {
        Self {
            id: value.id().to_string(),
            bucket_name: value.bucket().bucket_name().to_owned(),
            region: value.bucket().region().to_owned(),
            reason: value.reason().to_owned(),
            duration_in_minutes: value.duration().minutes(),
            status: value.status().as_str().to_owned(),
            requested_at: value.requested_at().to_rfc3339(),
            expires_at: value.expires_at().map(|expires_at| expires_at.to_rfc3339()),
            denial_reason: value.denial_reason().map(ToOwned::to_owned),
            user_id: value.requester().user_id().to_owned(),
            user_name: value.requester().user_name().to_owned(),
            user_email: value.requester().user_email().map(ToOwned::to_owned),
            user_image: value.requester().user_image().map(ToOwned::to_owned),
        }
    }
}
