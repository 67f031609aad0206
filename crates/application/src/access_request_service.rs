use std::sync::Arc;

use bucketgate_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use bucketgate_domain::{
    AccessDuration, AccessRequest, AccessRequestId, BucketRef, Capability, RequesterSnapshot,
};
use tracing::{info, warn};

use crate::access_policy::{require_capability, resolve_role};
use crate::{
    AccessRequestBatchOutcome, AccessRequestRepository, Clock, CreateAccessRequestsInput,
};

#[cfg(test)]
mod tests;

/// Application service for the access request lifecycle.
#[derive(Clone)]
pub struct AccessRequestService {
    repository: Arc<dyn AccessRequestRepository>,
    clock: Arc<dyn Clock>,
}

impl AccessRequestService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessRequestRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Creates one pending request per submitted bucket.
    ///
    /// Not transactional: when fewer records are written than requested the
    /// call fails with `PartialWrite` and the written records stay in place.
    pub async fn create(
        &self,
        actor: &UserIdentity,
        input: CreateAccessRequestsInput,
    ) -> AppResult<AccessRequestBatchOutcome> {
        if input.buckets.is_empty() {
            return Err(AppError::Validation(
                "at least one bucket is required".to_owned(),
            ));
        }

        let reason = NonEmptyString::for_field("reason", input.reason)?;
        let duration = AccessDuration::from_minutes(input.duration_minutes)?;
        let buckets = input
            .buckets
            .into_iter()
            .map(|item| BucketRef::new(item.bucket_name, item.region))
            .collect::<AppResult<Vec<_>>>()?;

        let requester = RequesterSnapshot::capture(actor);
        let requested_at = self.clock.now();
        let requests: Vec<AccessRequest> = buckets
            .into_iter()
            .map(|bucket| {
                AccessRequest::new_pending(
                    bucket,
                    reason.clone(),
                    duration,
                    requester.clone(),
                    requested_at,
                )
            })
            .collect();

        let attempted = requests.len();
        let report = self.repository.insert_batch(requests).await?;
        let outcome = AccessRequestBatchOutcome {
            attempted,
            succeeded: report.inserted.len(),
            ids: report.inserted,
        };

        if !outcome.is_complete() {
            warn!(
                subject = actor.subject(),
                attempted = outcome.attempted,
                succeeded = outcome.succeeded,
                failure = report.failure.as_deref().unwrap_or("unknown"),
                "access request batch partially written"
            );
            return Err(AppError::PartialWrite {
                attempted: outcome.attempted,
                succeeded: outcome.succeeded,
                ids: outcome.ids.iter().map(ToString::to_string).collect(),
            });
        }

        info!(
            subject = actor.subject(),
            count = outcome.succeeded,
            duration_minutes = duration.minutes(),
            "access requests created"
        );

        Ok(outcome)
    }

    /// Lists requests visible to the caller, newest first.
    ///
    /// Privileged roles see every request; other roles see their own.
    pub async fn list_for_requester(&self, actor: &UserIdentity) -> AppResult<Vec<AccessRequest>> {
        let role = resolve_role(actor)?;

        if role.has_capability(Capability::ViewAllAccessRequests) {
            return self.repository.list_all().await;
        }

        self.repository.list_for_user(actor.subject()).await
    }

    /// Lists grants active right now, soonest expiry first.
    pub async fn list_active(&self, actor: &UserIdentity) -> AppResult<Vec<AccessRequest>> {
        require_capability(actor, Capability::MonitorActiveGrants)?;

        let now = self.clock.now();
        let mut requests = self.repository.list_active_at(now).await?;
        requests.retain(|request| request.is_active_at(now));

        Ok(requests)
    }

    /// Approves a pending request; the grant starts now.
    pub async fn approve(
        &self,
        actor: &UserIdentity,
        request_id: AccessRequestId,
    ) -> AppResult<AccessRequest> {
        require_capability(actor, Capability::DecideAccessRequests)?;

        let approved = self
            .find_existing(request_id)
            .await?
            .approve(self.clock.now())?;
        self.repository.save_decision(&approved).await?;

        info!(
            subject = actor.subject(),
            request_id = %request_id,
            bucket = approved.bucket().bucket_name(),
            requester = approved.requester().user_id(),
            "access request approved"
        );

        Ok(approved)
    }

    /// Denies a pending request with a reason.
    pub async fn deny(
        &self,
        actor: &UserIdentity,
        request_id: AccessRequestId,
        denial_reason: String,
    ) -> AppResult<AccessRequest> {
        require_capability(actor, Capability::DecideAccessRequests)?;

        let denial_reason = NonEmptyString::for_field("denial reason", denial_reason)?;
        let denied = self.find_existing(request_id).await?.deny(denial_reason)?;
        self.repository.save_decision(&denied).await?;

        info!(
            subject = actor.subject(),
            request_id = %request_id,
            bucket = denied.bucket().bucket_name(),
            "access request denied"
        );

        Ok(denied)
    }

    async fn find_existing(&self, request_id: AccessRequestId) -> AppResult<AccessRequest> {
        self.repository
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("access request '{request_id}'")))
    }
}
