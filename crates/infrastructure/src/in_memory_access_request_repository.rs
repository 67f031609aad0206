use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use bucketgate_application::{AccessRequestInsertReport, AccessRequestRepository};
use bucketgate_core::{AppError, AppResult};
use bucketgate_domain::{AccessRequest, AccessRequestId, AccessRequestStatus};


/// In-memory access request repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryAccessRequestRepository {
    requests: RwLock<Vec<AccessRequest>>,
}

impl InMemoryAccessRequestRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
        }
    }

    async fn newest_first<F>(&self, predicate: F) -> Vec<AccessRequest>
    where
        F: Fn(&AccessRequest) -> bool,
    {
        let requests = self.requests.read().await;
        let mut values: Vec<AccessRequest> = requests
            .iter()
            .filter(|request| predicate(request))
            .cloned()
            .collect();
        values.sort_by_key(|request| Reverse(request.requested_at()));
        values
    }
}

#[async_trait]
impl AccessRequestRepository for InMemoryAccessRequestRepository {
    async fn insert_batch(
        &self,
        requests: Vec<AccessRequest>,
    ) -> AppResult<AccessRequestInsertReport> {
        let mut stored = self.requests.write().await;
        let mut report = AccessRequestInsertReport::default();

        for request in requests {
            if stored.iter().any(|existing| existing.id() == request.id()) {
                report.failure = Some(format!(
                    "access request '{}' already exists",
                    request.id()
                ));
                break;
            }

            report.inserted.push(request.id());
            stored.push(request);
        }

        Ok(report)
    }

    async fn find_by_id(&self, id: AccessRequestId) -> AppResult<Option<AccessRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.iter().find(|request| request.id() == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<AccessRequest>> {
        Ok(self.newest_first(|_| true).await)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<AccessRequest>> {
        Ok(self
            .newest_first(|request| request.requester().user_id() == user_id)
            .await)
    }

    async fn list_active_at(&self, now: DateTime<Utc>) -> AppResult<Vec<AccessRequest>> {
        let requests = self.requests.read().await;
        let mut active: Vec<AccessRequest> = requests
            .iter()
            .filter(|request| request.is_active_at(now))
            .cloned()
            .collect();
        active.sort_by_key(AccessRequest::expires_at);
        Ok(active)
    }

    async fn list_approved_for_bucket(
        &self,
        bucket_name: &str,
        user_id: &str,
    ) -> AppResult<Vec<AccessRequest>> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|request| {
                request.status() == AccessRequestStatus::Approved
                    && request.bucket().bucket_name() == bucket_name
                    && request.requester().user_id() == user_id
            })
            .cloned()
            .collect())
    }

    async fn save_decision(&self, request: &AccessRequest) -> AppResult<()> {
        let mut requests = self.requests.write().await;
        let stored = requests
            .iter_mut()
            .find(|stored| stored.id() == request.id())
            .ok_or_else(|| {
                AppError::NotFound(format!("access request '{}' not found", request.id()))
            })?;

        if stored.status() != AccessRequestStatus::Pending {
            return Err(AppError::Conflict(format!(
                "access request '{}' was already {}",
                stored.id(),
                stored.status().as_str()
            )));
        }

        *stored = request.clone();
        Ok(())
    }
}
