use async_trait::async_trait;

use bucketgate_application::{BucketCatalog, BucketDescriptor};
use bucketgate_core::{AppError, AppResult};
use bucketgate_domain::{BaseAccess, Region};

/// Bucket catalog fixed at start-up.
#[derive(Debug, Clone, Default)]
pub struct StaticBucketCatalog {
    buckets: Vec<BucketDescriptor>,
}

impl StaticBucketCatalog {
    /// Creates a catalog from already validated descriptors.
    #[must_use]
    pub fn new(buckets: Vec<BucketDescriptor>) -> Self {
        Self { buckets }
    }

    /// Parses comma-separated `name@region[:read-write]` entries.
    pub fn parse(entries: &str) -> AppResult<Self> {
        let mut buckets: Vec<BucketDescriptor> = Vec::new();

        for entry in entries.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (location, base_access) = match entry.split_once(':') {
                Some((location, "read-write")) => (location, BaseAccess::ReadWrite),
                Some((location, "read-only")) => (location, BaseAccess::ReadOnly),
                Some((_, other)) => {
                    return Err(AppError::Validation(format!(
                        "bucket catalog entry '{entry}' has unknown access level '{other}'"
                    )));
                }
                None => (entry, BaseAccess::ReadOnly),
            };

            let Some((name, region)) = location.split_once('@') else {
                return Err(AppError::Validation(format!(
                    "bucket catalog entry '{entry}' must look like name@region"
                )));
            };
            let name = name.trim();
            let region = region.trim();

            if name.is_empty() {
                return Err(AppError::Validation(format!(
                    "bucket catalog entry '{entry}' has an empty bucket name"
                )));
            }
            if Region::find(region).is_none() {
                return Err(AppError::Validation(format!(
                    "bucket catalog entry '{entry}' names unknown region '{region}'"
                )));
            }
            if buckets.iter().any(|bucket| bucket.name == name) {
                return Err(AppError::Validation(format!(
                    "bucket '{name}' is listed more than once"
                )));
            }

            buckets.push(BucketDescriptor {
                name: name.to_owned(),
                region: region.to_owned(),
                base_access,
            });
        }

        Ok(Self::new(buckets))
    }
}

#[async_trait]
impl BucketCatalog for StaticBucketCatalog {
    async fn list_buckets(&self) -> AppResult<Vec<BucketDescriptor>> {
        Ok(self.buckets.clone())
    }

    async fn find_bucket(&self, bucket_name: &str) -> AppResult<Option<BucketDescriptor>> {
        Ok(self
            .buckets
            .iter()
            .find(|bucket| bucket.name == bucket_name)
            .cloned())
    }
}
