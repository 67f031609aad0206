use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bucketgate_core::AppResult;
use bucketgate_domain::{AccessRequest, AccessRequestId};

use super::AccessRequestInsertReport;

/// Persistence port for access request records.
///
/// Holds no policy: role scoping and validation live in the service.
#[async_trait]
pub trait AccessRequestRepository: Send + Sync {
    /// Inserts records one at a time without a transaction.
    ///
    /// Records written before a failure stay written and are listed in the
    /// report.
    async fn insert_batch(
        &self,
        requests: Vec<AccessRequest>,
    ) -> AppResult<AccessRequestInsertReport>;

    /// Finds one record by identifier.
    async fn find_by_id(&self, id: AccessRequestId) -> AppResult<Option<AccessRequest>>;

    /// Lists every record, newest `requested_at` first.
    async fn list_all(&self) -> AppResult<Vec<AccessRequest>>;

    /// Lists records created by one user, newest `requested_at` first.
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<AccessRequest>>;

    /// Lists approved records with `expires_at > now`, soonest expiry first.
    async fn list_active_at(&self, now: DateTime<Utc>) -> AppResult<Vec<AccessRequest>>;

    /// Lists approved records of one user for one bucket, expired or not.
    async fn list_approved_for_bucket(
        &self,
        bucket_name: &str,
        user_id: &str,
    ) -> AppResult<Vec<AccessRequest>>;

    /// Persists an approve or deny decision on a record that is still pending.
    ///
    /// Fails with `Conflict` when the stored record was already decided.
    async fn save_decision(&self, request: &AccessRequest) -> AppResult<()>;
}
