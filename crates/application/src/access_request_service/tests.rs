use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;

use bucketgate_core::AppError;
use bucketgate_domain::{AccessRequestId, AccessRequestStatus};

use crate::test_support::{FakeAccessRequestRepository, FixedClock, identity, start_time};
use crate::{BucketRequestItem, Clock, CreateAccessRequestsInput};

use super::AccessRequestService;

fn service() -> (
    AccessRequestService,
    Arc<FakeAccessRequestRepository>,
    Arc<FixedClock>,
) {
    let repository = Arc::new(FakeAccessRequestRepository::default());
    let clock = FixedClock::at(start_time());
    (
        AccessRequestService::new(repository.clone(), clock.clone()),
        repository,
        clock,
    )
}

fn input(buckets: &[&str], duration_minutes: i64) -> CreateAccessRequestsInput {
    CreateAccessRequestsInput {
        buckets: buckets
            .iter()
            .map(|name| BucketRequestItem {
                bucket_name: (*name).to_owned(),
                region: "eu-west-1".to_owned(),
            })
            .collect(),
        reason: "quarterly data fix".to_owned(),
        duration_minutes,
    }
}

#[tokio::test]
async fn duration_boundaries_are_enforced() {
    let (service, _, _) = service();
    let actor = identity("alice", "member");

    for (duration, accepted) in [(14, false), (15, true), (525_600, true), (525_601, false)] {
        let result = service.create(&actor, input(&["logs"], duration)).await;
        assert_eq!(result.is_ok(), accepted, "duration {duration}");
        if !accepted {
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }
}

#[tokio::test]
async fn empty_bucket_list_and_reason_are_rejected() {
    let (service, repository, _) = service();
    let actor = identity("alice", "member");

    let empty_buckets = service.create(&actor, input(&[], 60)).await;
    let mut blank_reason = input(&["logs"], 60);
    blank_reason.reason = "   ".to_owned();
    let blank_reason = service.create(&actor, blank_reason).await;

    assert!(matches!(empty_buckets, Err(AppError::Validation(_))));
    assert!(matches!(blank_reason, Err(AppError::Validation(_))));
    assert!(repository.records.lock().await.is_empty());
}

#[tokio::test]
async fn batch_creates_one_pending_record_per_bucket() {
    let (service, repository, _) = service();
    let actor = identity("alice", "member");

    let outcome = service
        .create(&actor, input(&["logs", "billing", "exports"], 120))
        .await;

    assert!(outcome.is_ok());
    let outcome = outcome.unwrap_or_else(|_| unreachable!());
    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.succeeded, 3);

    let records = repository.records.lock().await;
    assert_eq!(records.len(), 3);
    for record in records.iter() {
        assert_eq!(record.status(), AccessRequestStatus::Pending);
        assert_eq!(record.expires_at(), None);
        assert_eq!(record.reason(), "quarterly data fix");
        assert_eq!(record.duration().minutes(), 120);
        assert_eq!(record.requested_at(), start_time());
        assert_eq!(record.requester().user_id(), "alice");
        assert_eq!(record.requester().user_email(), Some("alice@example.com"));
    }

    let ids: HashSet<AccessRequestId> = records.iter().map(|record| record.id()).collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn partial_write_fails_without_rollback() {
    let repository = Arc::new(FakeAccessRequestRepository::failing_after(1));
    let service = AccessRequestService::new(repository.clone(), FixedClock::at(start_time()));

    let result = service
        .create(&identity("alice", "member"), input(&["a", "b", "c"], 60))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PartialWrite {
            attempted: 3,
            succeeded: 1,
            ..
        })
    ));
    assert_eq!(repository.records.lock().await.len(), 1);
}

#[tokio::test]
async fn non_privileged_caller_only_sees_own_requests() {
    let (service, _, clock) = service();
    let alice = identity("alice", "member");
    let bob = identity("bob", "member");

    assert!(service.create(&alice, input(&["logs"], 60)).await.is_ok());
    clock.advance(Duration::minutes(1));
    assert!(service.create(&bob, input(&["logs"], 60)).await.is_ok());

    let visible = service.list_for_requester(&alice).await;
    assert!(visible.is_ok());
    let visible = visible.unwrap_or_default();
    assert_eq!(visible.len(), 1);
    assert!(
        visible
            .iter()
            .all(|request| request.requester().user_id() == "alice")
    );
}

#[tokio::test]
async fn admin_sees_all_requests_newest_first() {
    let (service, _, clock) = service();

    assert!(
        service
            .create(&identity("alice", "member"), input(&["logs"], 60))
            .await
            .is_ok()
    );
    clock.advance(Duration::minutes(5));
    assert!(
        service
            .create(&identity("bob", "member"), input(&["logs"], 60))
            .await
            .is_ok()
    );

    let listed = service
        .list_for_requester(&identity("carol", "admin"))
        .await
        .unwrap_or_default();

    let requesters: Vec<&str> = listed
        .iter()
        .map(|request| request.requester().user_id())
        .collect();
    assert_eq!(requesters, vec!["bob", "alice"]);
}

#[tokio::test]
async fn listing_without_role_is_unauthorized() {
    let (service, _, _) = service();
    let anonymous = bucketgate_core::UserIdentity::new("ghost", "Ghost", None, None, None);

    let result = service.list_for_requester(&anonymous).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn active_list_is_admin_only_and_excludes_expired() {
    let (service, repository, clock) = service();
    let admin = identity("root", "owner");

    assert!(
        service
            .create(&identity("alice", "member"), input(&["short", "long", "pending"], 30))
            .await
            .is_ok()
    );
    let ids: Vec<(String, AccessRequestId)> = repository
        .records
        .lock()
        .await
        .iter()
        .map(|record| (record.bucket().bucket_name().to_owned(), record.id()))
        .collect();
    for (bucket, id) in &ids {
        if bucket != "pending" {
            assert!(service.approve(&admin, *id).await.is_ok());
        }
    }

    let member_result = service.list_active(&identity("alice", "member")).await;
    assert!(matches!(member_result, Err(AppError::Unauthorized(_))));

    let active = service.list_active(&admin).await.unwrap_or_default();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|request| {
        request.status() == AccessRequestStatus::Approved
            && request.expires_at() > Some(clock.now())
    }));

    clock.advance(Duration::minutes(30));
    let after_expiry = service.list_active(&admin).await.unwrap_or_default();
    assert!(after_expiry.is_empty());
}

#[tokio::test]
async fn approve_sets_expiry_and_blocks_second_decision() {
    let (service, repository, clock) = service();
    let admin = identity("root", "admin");

    assert!(
        service
            .create(&identity("alice", "member"), input(&["logs"], 60))
            .await
            .is_ok()
    );
    let id = repository.records.lock().await[0].id();
    clock.advance(Duration::minutes(10));

    let approved = service.approve(&admin, id).await;
    assert!(approved.is_ok());
    let approved = approved.unwrap_or_else(|_| unreachable!());
    assert_eq!(
        approved.expires_at(),
        Some(start_time() + Duration::minutes(70))
    );

    let denied = service.deny(&admin, id, "too late".to_owned()).await;
    assert!(matches!(denied, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn deny_requires_capability_and_reason() {
    let (service, repository, _) = service();

    assert!(
        service
            .create(&identity("alice", "member"), input(&["logs"], 60))
            .await
            .is_ok()
    );
    let id = repository.records.lock().await[0].id();

    let by_member = service
        .deny(&identity("alice", "member"), id, "nope".to_owned())
        .await;
    let blank = service
        .deny(&identity("root", "admin"), id, " ".to_owned())
        .await;
    let unknown = service
        .approve(&identity("root", "admin"), AccessRequestId::new())
        .await;

    assert!(matches!(by_member, Err(AppError::Unauthorized(_))));
    assert!(matches!(blank, Err(AppError::Validation(_))));
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
}
