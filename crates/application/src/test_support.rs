use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::{Barrier, Mutex};

use bucketgate_core::{AppError, AppResult, UserIdentity};
use bucketgate_domain::{
    AccessRequest, AccessRequestId, AccessRequestStatus, BaseAccess, ObjectKey,
};

use crate::{
    AccessRequestInsertReport, AccessRequestRepository, BucketCatalog, BucketDescriptor, Clock,
    ObjectEntry, ObjectStore,
};

pub(crate) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
}

pub(crate) fn identity(subject: &str, role: &str) -> UserIdentity {
    UserIdentity::new(
        subject,
        format!("{subject} display"),
        Some(format!("{subject}@example.com")),
        None,
        Some(role.to_owned()),
    )
}

pub(crate) struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub(crate) fn at(instant: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            millis: AtomicI64::new(instant.timestamp_millis()),
        })
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

#[derive(Default)]
pub(crate) struct FakeAccessRequestRepository {
    pub(crate) records: Mutex<Vec<AccessRequest>>,
    pub(crate) fail_after: Option<usize>,
}

impl FakeAccessRequestRepository {
    pub(crate) fn failing_after(count: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_after: Some(count),
        }
    }

    async fn sorted_newest_first(&self, user_id: Option<&str>) -> Vec<AccessRequest> {
        let mut records: Vec<AccessRequest> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| user_id.is_none_or(|user_id| record.requester().user_id() == user_id))
            .cloned()
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse(record.requested_at()));
        records
    }
}

#[async_trait]
impl AccessRequestRepository for FakeAccessRequestRepository {
    async fn insert_batch(
        &self,
        requests: Vec<AccessRequest>,
    ) -> AppResult<AccessRequestInsertReport> {
        let mut records = self.records.lock().await;
        let mut report = AccessRequestInsertReport::default();

        for request in requests {
            if self
                .fail_after
                .is_some_and(|limit| report.inserted.len() >= limit)
            {
                report.failure = Some("simulated write failure".to_owned());
                break;
            }
            report.inserted.push(request.id());
            records.push(request);
        }

        Ok(report)
    }

    async fn find_by_id(&self, id: AccessRequestId) -> AppResult<Option<AccessRequest>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<AccessRequest>> {
        Ok(self.sorted_newest_first(None).await)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<AccessRequest>> {
        Ok(self.sorted_newest_first(Some(user_id)).await)
    }

    async fn list_active_at(&self, now: DateTime<Utc>) -> AppResult<Vec<AccessRequest>> {
        let mut records: Vec<AccessRequest> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| record.is_active_at(now))
            .cloned()
            .collect();
        records.sort_by_key(AccessRequest::expires_at);
        Ok(records)
    }

    async fn list_approved_for_bucket(
        &self,
        bucket_name: &str,
        user_id: &str,
    ) -> AppResult<Vec<AccessRequest>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| {
                record.status() == AccessRequestStatus::Approved
                    && record.bucket().bucket_name() == bucket_name
                    && record.requester().user_id() == user_id
            })
            .cloned()
            .collect())
    }

    async fn save_decision(&self, request: &AccessRequest) -> AppResult<()> {
        let mut records = self.records.lock().await;
        let stored = records
            .iter_mut()
            .find(|record| record.id() == request.id())
            .ok_or_else(|| AppError::NotFound(format!("access request '{}'", request.id())))?;

        if stored.status() != AccessRequestStatus::Pending {
            return Err(AppError::Conflict("already decided".to_owned()));
        }

        *stored = request.clone();
        Ok(())
    }
}

pub(crate) struct FakeBucketCatalog {
    pub(crate) buckets: Vec<BucketDescriptor>,
}

impl FakeBucketCatalog {
    pub(crate) fn with(buckets: &[(&str, &str, BaseAccess)]) -> Self {
        Self {
            buckets: buckets
                .iter()
                .map(|(name, region, base_access)| BucketDescriptor {
                    name: (*name).to_owned(),
                    region: (*region).to_owned(),
                    base_access: *base_access,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl BucketCatalog for FakeBucketCatalog {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreCall {
    List(String),
    Presign(String),
    Put(String),
    Delete(String),
}

#[derive(Default)]
pub(crate) struct FakeObjectStore {
    pub(crate) objects: Mutex<BTreeMap<String, Vec<u8>>>,
    pub(crate) calls: Mutex<Vec<StoreCall>>,
    pub(crate) failing_keys: HashSet<String>,
    pub(crate) delete_barrier: Option<Barrier>,
}

impl FakeObjectStore {
    pub(crate) fn failing_on(keys: &[&str]) -> Self {
        Self {
            failing_keys: keys.iter().map(|key| (*key).to_owned()).collect(),
            ..Self::default()
        }
    }

    /// Every delete waits until `parties` deletes are in flight together.
    pub(crate) fn rendezvous_on_delete(parties: usize) -> Self {
        Self {
            delete_barrier: Some(Barrier::new(parties)),
            ..Self::default()
        }
    }

    pub(crate) async fn seed(&self, keys: &[&str]) {
        let mut objects = self.objects.lock().await;
        for key in keys {
            objects.insert((*key).to_owned(), b"seed".to_vec());
        }
    }

    pub(crate) async fn keys(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    fn check(&self, key: &ObjectKey) -> AppResult<()> {
        if self.failing_keys.contains(key.as_str()) {
            return Err(AppError::Storage(format!("simulated failure for '{key}'")));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn list_objects(
        &self,
        _bucket: &BucketDescriptor,
        prefix: &str,
    ) -> AppResult<Vec<ObjectEntry>> {
        self.calls
            .lock()
            .await
            .push(StoreCall::List(prefix.to_owned()));

        Ok(self
            .objects
            .lock()
            .await
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, body)| ObjectEntry {
                key: key.clone(),
                size_bytes: body.len() as u64,
                last_modified: None,
                is_folder: key.ends_with('/'),
            })
            .collect())
    }

    async fn presigned_url(
        &self,
        bucket: &BucketDescriptor,
        key: &ObjectKey,
        for_download: bool,
        ttl_seconds: u32,
    ) -> AppResult<String> {
        self.calls
            .lock()
            .await
            .push(StoreCall::Presign(key.to_string()));

        Ok(format!(
            "memory://{}/{key}?download={for_download}&ttl={ttl_seconds}",
            bucket.name
        ))
    }

    async fn put_object(
        &self,
        _bucket: &BucketDescriptor,
        key: &ObjectKey,
        body: Vec<u8>,
    ) -> AppResult<()> {
        self.calls.lock().await.push(StoreCall::Put(key.to_string()));
        self.check(key)?;
        self.objects.lock().await.insert(key.to_string(), body);
        Ok(())
    }

    async fn delete_object(&self, _bucket: &BucketDescriptor, key: &ObjectKey) -> AppResult<()> {
        self.calls
            .lock()
            .await
            .push(StoreCall::Delete(key.to_string()));
        if let Some(barrier) = &self.delete_barrier {
            barrier.wait().await;
        }
        self.check(key)?;
        self.objects.lock().await.remove(key.as_str());
        Ok(())
    }
}
