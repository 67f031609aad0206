use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use bucketgate_application::{BucketDescriptor, Clock, ObjectEntry, ObjectStore};
use bucketgate_core::AppResult;
use bucketgate_domain::ObjectKey;


#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    last_modified: DateTime<Utc>,
}

/// In-memory object store keyed by bucket name.
///
/// Listing follows delimiter semantics: only entries directly under the
/// prefix are returned and deeper keys collapse into folder entries.
pub struct InMemoryObjectStore {
    buckets: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Returns a stored object body, if present.
    pub async fn object_body(&self, bucket_name: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .read()
            .await
            .get(bucket_name)
            .and_then(|objects| objects.get(key))
            .map(|object| object.body.clone())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_objects(
        &self,
        bucket: &BucketDescriptor,
        prefix: &str,
    ) -> AppResult<Vec<ObjectEntry>> {
        let buckets = self.buckets.read().await;
        let Some(objects) = buckets.get(bucket.name.as_str()) else {
            return Ok(Vec::new());
        };

        let mut folders = BTreeSet::new();
        let mut entries = Vec::new();

        for (key, object) in objects.range(prefix.to_owned()..) {
            let Some(remainder) = key.strip_prefix(prefix) else {
                break;
            };
            if remainder.is_empty() {
                continue;
            }

            match remainder.find('/') {
                Some(index) => {
                    folders.insert(format!("{prefix}{}", &remainder[..=index]));
                }
                None => entries.push(ObjectEntry {
                    key: key.clone(),
                    size_bytes: object.body.len() as u64,
                    last_modified: Some(object.last_modified),
                    is_folder: false,
                }),
            }
        }

        let mut listing: Vec<ObjectEntry> = folders
            .into_iter()
            .map(|key| ObjectEntry {
                key,
                size_bytes: 0,
                last_modified: None,
                is_folder: true,
            })
            .collect();
        listing.extend(entries);

        Ok(listing)
    }

    async fn presigned_url(
        &self,
        bucket: &BucketDescriptor,
        key: &ObjectKey,
        for_download: bool,
        ttl_seconds: u32,
    ) -> AppResult<String> {
        let expires_at = self.clock.now() + Duration::seconds(i64::from(ttl_seconds));
        let disposition = if for_download { "attachment" } else { "inline" };

        Ok(format!(
            "memory://{}/{}?disposition={disposition}&expires={}",
            bucket.name,
            key,
            expires_at.timestamp()
        ))
    }

    async fn put_object(
        &self,
        bucket: &BucketDescriptor,
        key: &ObjectKey,
        body: Vec<u8>,
    ) -> AppResult<()> {
        let last_modified = self.clock.now();
        self.buckets
            .write()
            .await
            .entry(bucket.name.clone())
            .or_default()
            .insert(
                key.to_string(),
                StoredObject {
                    body,
                    last_modified,
                },
            );

        Ok(())
    }

    async fn delete_object(&self, bucket: &BucketDescriptor, key: &ObjectKey) -> AppResult<()> {
        if let Some(objects) = self.buckets.write().await.get_mut(bucket.name.as_str()) {
            objects.remove(key.as_str());
        }

        Ok(())
    }
}
