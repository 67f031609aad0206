use bucketgate_application::{BatchSummary, ObjectEntry, ObjectListing, ObjectUrl};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize)]
pub struct ObjectListQuery {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectUrlQuery {
    pub for_download: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub path: Option<String>,
}

/// One entry in an object listing.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/object-entry-response.ts"
)]
pub struct ObjectEntryResponse {
    pub key: String,
    pub size_bytes: u64,
    pub last_modified: Option<String>,
    pub is_folder: bool,
}

impl From<ObjectEntry> for ObjectEntryResponse {
    fn from(value: ObjectEntry) -> Self {
        Self {
            key: value.key,
            size_bytes: value.size_bytes,
            last_modified: value
                .last_modified
                .map(|last_modified| last_modified.to_rfc3339()),
            is_folder: value.is_folder,
        }
    }
}

/// Object listing; capability flags are display hints only.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/object-listing-response.ts"
)]
pub struct ObjectListingResponse {
    pub prefix: String,
    pub entries: Vec<ObjectEntryResponse>,
    pub can_write: bool,
    pub can_delete: bool,
}

impl From<ObjectListing> for ObjectListingResponse {
    fn from(value: ObjectListing) -> Self {
        Self {
            prefix: value.prefix,
            entries: value
                .entries
                .into_iter()
                .map(ObjectEntryResponse::from)
                .collect(),
            can_write: value.access.write,
            can_delete: value.access.delete,
        }
    }
}

/// Time-limited object URL.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/object-url-response.ts"
)]
pub struct ObjectUrlResponse {
    pub url: String,
    pub expires_in_seconds: u32,
}

impl From<ObjectUrl> for ObjectUrlResponse {
    fn from(value: ObjectUrl) -> Self {
        Self {
            url: value.url,
            expires_in_seconds: value.expires_in_seconds,
        }
    }
}

/// Key written by an upload or folder creation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/object-key-response.ts"
)]
pub struct ObjectKeyResponse {
    pub key: String,
}

/// Incoming payload for folder creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-folder-request.ts"
)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub prefix: String,
    pub name: String,
}

/// Incoming payload for a multi-object delete.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/batch-delete-request.ts"
)]
pub struct BatchDeleteRequest {
    pub keys: Vec<String>,
}

/// Keys affected by a fully successful batch.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/batch-result-response.ts"
)]
pub struct BatchResultResponse {
    pub keys: Vec<String>,
}

impl From<BatchSummary> for BatchResultResponse {
    fn from(value: BatchSummary) -> Self {
        Self { keys: value.keys }
    }
}
