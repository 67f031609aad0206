use std::sync::Arc;

use bucketgate_core::{AppResult, UserIdentity};
use bucketgate_domain::{EffectiveAccess, ObjectAction, ObjectKey, normalize_prefix};
use tracing::info;

use crate::{ObjectEntry, ObjectStore, PermissionService};

/// Object listing annotated with the caller's resolved capabilities.
///
/// The capabilities are display hints; mutating calls re-resolve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectListing {
    /// Normalized prefix that was listed.
    pub prefix: String,
    /// Entries directly under the prefix.
    pub entries: Vec<ObjectEntry>,
    /// Effective access at listing time.
    pub access: EffectiveAccess,
}

/// Time-limited object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl {
    /// URL to fetch the object.
    pub url: String,
    /// Lifetime of the URL.
    pub expires_in_seconds: u32,
}

/// Enforcement point for object routes.
///
/// Every mutating call resolves permission before the object store is
/// touched; a denied call never reaches the store.
#[derive(Clone)]
pub struct ObjectOperationGateway {
    permission_service: PermissionService,
    object_store: Arc<dyn ObjectStore>,
    presigned_url_ttl_seconds: u32,
}

impl ObjectOperationGateway {
    /// Creates a new gateway from required dependencies.
    #[must_use]
    pub fn new(
        permission_service: PermissionService,
        object_store: Arc<dyn ObjectStore>,
        presigned_url_ttl_seconds: u32,
    ) -> Self {
        Self {
            permission_service,
            object_store,
            presigned_url_ttl_seconds,
        }
    }

    /// Resolves access and fails with `Forbidden` when `action` is not allowed.
    pub async fn authorize(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        action: ObjectAction,
    ) -> AppResult<EffectiveAccess> {
        self.permission_service
            .require(actor, bucket_name, action)
            .await
            .map(|resolved| resolved.access)
    }

    /// Lists objects under `prefix` with resolved capability flags.
    pub async fn list_objects(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        prefix: &str,
    ) -> AppResult<ObjectListing> {
        let resolved = self
            .permission_service
            .require(actor, bucket_name, ObjectAction::Read)
            .await?;
        let prefix = normalize_prefix(prefix);

        let mut entries = self
            .object_store
            .list_objects(&resolved.bucket, prefix.as_str())
            .await?;
        entries.sort_by(|left, right| {
            right
                .is_folder
                .cmp(&left.is_folder)
                .then_with(|| left.key.cmp(&right.key))
        });

        Ok(ObjectListing {
            prefix,
            entries,
            access: resolved.access,
        })
    }

    /// Issues a time-limited URL for reading or downloading one object.
    pub async fn object_url(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        key: &str,
        for_download: bool,
    ) -> AppResult<ObjectUrl> {
        let key = ObjectKey::new(key)?;
        let resolved = self
            .permission_service
            .require(actor, bucket_name, ObjectAction::Read)
            .await?;

        let url = self
            .object_store
            .presigned_url(
                &resolved.bucket,
                &key,
                for_download,
                self.presigned_url_ttl_seconds,
            )
            .await?;

        Ok(ObjectUrl {
            url,
            expires_in_seconds: self.presigned_url_ttl_seconds,
        })
    }

    /// Uploads an object; a key ending in `/` writes an empty folder marker.
    pub async fn put_object(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        key: &str,
        body: Vec<u8>,
    ) -> AppResult<ObjectKey> {
        let key = ObjectKey::new(key)?;
        let resolved = self
            .permission_service
            .require(actor, bucket_name, ObjectAction::Write)
            .await?;

        let body = if key.is_folder_marker() {
            Vec::new()
        } else {
            body
        };
        let size_bytes = body.len();

        self.object_store
            .put_object(&resolved.bucket, &key, body)
            .await?;

        info!(
            subject = actor.subject(),
            bucket = bucket_name,
            key = key.as_str(),
            size_bytes,
            "object written"
        );

        Ok(key)
    }

    /// Creates a folder marker named `name` under `prefix`.
    pub async fn create_folder(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        prefix: &str,
        name: &str,
    ) -> AppResult<ObjectKey> {
        let key = ObjectKey::folder(prefix, name)?;
        self.put_object(actor, bucket_name, key.as_str(), Vec::new())
            .await
    }

    /// Deletes one object.
    pub async fn delete_object(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        key: &str,
    ) -> AppResult<()> {
        let key = ObjectKey::new(key)?;
        let resolved = self
            .permission_service
            .require(actor, bucket_name, ObjectAction::Delete)
            .await?;

        self.object_store
            .delete_object(&resolved.bucket, &key)
            .await?;

        info!(
            subject = actor.subject(),
            bucket = bucket_name,
            key = key.as_str(),
            "object deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use bucketgate_core::{AppError, NonEmptyString};
    use bucketgate_domain::{
        AccessDuration, AccessRequest, BaseAccess, BucketRef, RequesterSnapshot,
    };

    use crate::test_support::{
        FakeAccessRequestRepository, FakeBucketCatalog, FakeObjectStore, FixedClock, StoreCall,
        identity, start_time,
    };
    use crate::{AccessRequestRepository, PermissionService};

    use super::ObjectOperationGateway;

    struct Fixture {
        gateway: ObjectOperationGateway,
        store: Arc<FakeObjectStore>,
        clock: Arc<FixedClock>,
    }

    async fn fixture(grant_minutes: Option<i64>) -> Fixture {
        let repository = Arc::new(FakeAccessRequestRepository::default());
        if let Some(minutes) = grant_minutes {
            let grant = AccessRequest::new_pending(
                BucketRef::new("logs", "eu-west-1").unwrap_or_else(|_| unreachable!()),
                NonEmptyString::new("cleanup").unwrap_or_else(|_| unreachable!()),
                AccessDuration::from_minutes(minutes).unwrap_or_else(|_| unreachable!()),
                RequesterSnapshot::new("alice", "Alice", None, None),
                start_time(),
            )
            .approve(start_time())
            .unwrap_or_else(|_| unreachable!());
            assert!(repository.insert_batch(vec![grant]).await.is_ok());
        }

        let clock = FixedClock::at(start_time());
        let catalog = Arc::new(FakeBucketCatalog::with(&[(
            "logs",
            "eu-west-1",
            BaseAccess::ReadOnly,
        )]));
        let store = Arc::new(FakeObjectStore::default());
        let permission_service = PermissionService::new(repository, catalog, clock.clone());

        Fixture {
            gateway: ObjectOperationGateway::new(permission_service, store.clone(), 300),
            store,
            clock,
        }
    }

    #[tokio::test]
    async fn listing_carries_capability_flags() {
        let fixture = fixture(Some(60)).await;
        fixture.store.seed(&["a/1.txt", "a/2.txt"]).await;

        let alice = fixture
            .gateway
            .list_objects(&identity("alice", "member"), "logs", "a")
            .await;
        let bob = fixture
            .gateway
            .list_objects(&identity("bob", "member"), "logs", "a")
            .await;

        assert!(alice.is_ok_and(|listing| listing.access.write
            && listing.access.delete
            && listing.prefix == "a/"
            && listing.entries.len() == 2));
        assert!(bob.is_ok_and(|listing| !listing.access.write && !listing.access.delete));
    }

    #[tokio::test]
    async fn denied_upload_never_reaches_the_store() {
        let fixture = fixture(None).await;

        let result = fixture
            .gateway
            .put_object(&identity("alice", "member"), "logs", "x.txt", b"x".to_vec())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(fixture.store.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn mutation_is_rechecked_after_grant_expiry() {
        let fixture = fixture(Some(60)).await;
        let alice = identity("alice", "member");

        let listing = fixture.gateway.list_objects(&alice, "logs", "").await;
        assert!(listing.is_ok_and(|listing| listing.access.write));

        fixture.clock.advance(Duration::minutes(60));
        let result = fixture
            .gateway
            .put_object(&alice, "logs", "late.txt", b"late".to_vec())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(!fixture.store.keys().await.contains(&"late.txt".to_owned()));
    }

    #[tokio::test]
    async fn folder_marker_is_written_empty() {
        let fixture = fixture(Some(60)).await;
        let alice = identity("alice", "member");

        let created = fixture
            .gateway
            .create_folder(&alice, "logs", "reports", "2026")
            .await;
        let slashed = fixture
            .gateway
            .create_folder(&alice, "logs", "reports", "a/b")
            .await;

        assert!(created.is_ok_and(|key| key.as_str() == "reports/2026/"));
        assert!(matches!(slashed, Err(AppError::Validation(_))));
        assert_eq!(
            fixture.store.objects.lock().await.get("reports/2026/"),
            Some(&Vec::new())
        );
    }

    #[tokio::test]
    async fn delete_requires_delete_capability() {
        let fixture = fixture(None).await;
        fixture.store.seed(&["keep.txt"]).await;

        let result = fixture
            .gateway
            .delete_object(&identity("alice", "member"), "logs", "keep.txt")
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(fixture.store.keys().await, vec!["keep.txt".to_owned()]);
    }

    #[tokio::test]
    async fn object_url_needs_only_read_access() {
        let fixture = fixture(None).await;

        let url = fixture
            .gateway
            .object_url(&identity("bob", "member"), "logs", "a/1.txt", true)
            .await;

        assert!(url.is_ok_and(|url| url.expires_in_seconds == 300 && url.url.contains("download=true")));
        assert_eq!(
            *fixture.store.calls.lock().await,
            vec![StoreCall::Presign("a/1.txt".to_owned())]
        );
    }
}
