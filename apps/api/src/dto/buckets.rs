use bucketgate_application::ResolvedBucketAccess;
use bucketgate_domain::Region;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize)]
pub struct BucketListQuery {
    pub region: Option<String>,
}

/// Catalog bucket with the caller's resolved access.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bucket-response.ts"
)]
pub struct BucketResponse {
    pub name: String,
    pub region: String,
    pub access: String,
    pub temp_access_expires_at: Option<String>,
}

impl From<ResolvedBucketAccess> for BucketResponse {
    fn from(value: ResolvedBucketAccess) -> Self {
        Self {
            name: value.bucket.name,
            region: value.bucket.region,
            access: value.access.level().as_str().to_owned(),
            temp_access_expires_at: value
                .access
                .grant_expires_at
                .map(|expires_at| expires_at.to_rfc3339()),
        }
    }
}

/// Region reference entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/region-response.ts"
)]
pub struct RegionResponse {
    pub id: String,
    pub name: String,
}

impl From<&Region> for RegionResponse {
    fn from(value: &Region) -> Self {
        Self {
            id: value.id.to_owned(),
            name: value.name.to_owned(),
        }
    }
}
