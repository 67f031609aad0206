use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bucketgate_core::AppResult;
use bucketgate_domain::{BaseAccess, ObjectKey};

/// Bucket catalog entry with its base access level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketDescriptor {
    /// Bucket name.
    pub name: String,
    /// Bucket region.
    pub region: String,
    /// Access level without temporary grants.
    pub base_access: BaseAccess,
}

/// One entry in an object listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Full object key; folders end with `/`.
    pub key: String,
    /// Object size in bytes, zero for folders.
    pub size_bytes: u64,
    /// Last modification time, when known.
    pub last_modified: Option<DateTime<Utc>>,
    /// Whether the entry is a folder (common prefix).
    pub is_folder: bool,
}

/// Port for bucket catalog metadata.
#[async_trait]
pub trait BucketCatalog: Send + Sync {
    /// Lists all catalog buckets.
    async fn list_buckets(&self) -> AppResult<Vec<BucketDescriptor>>;

    /// Finds one bucket by name.
    async fn find_bucket(&self, bucket_name: &str) -> AppResult<Option<BucketDescriptor>>;
}

/// Port for the object storage data plane.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists objects and folders directly under `prefix`.
    async fn list_objects(
        &self,
        bucket: &BucketDescriptor,
        prefix: &str,
    ) -> AppResult<Vec<ObjectEntry>>;

    /// Issues a time-limited URL for reading one object.
    async fn presigned_url(
        &self,
        bucket: &BucketDescriptor,
        key: &ObjectKey,
        for_download: bool,
        ttl_seconds: u32,
    ) -> AppResult<String>;

    /// Writes an object, replacing any existing one.
    async fn put_object(
        &self,
        bucket: &BucketDescriptor,
        key: &ObjectKey,
        body: Vec<u8>,
    ) -> AppResult<()>;

    /// Deletes an object.
    async fn delete_object(&self, bucket: &BucketDescriptor, key: &ObjectKey) -> AppResult<()>;
}

/// Wall-clock source; injectable so expiry can be tested.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
