use std::sync::Arc;

use bucketgate_core::{AppError, AppResult, UserIdentity};
use bucketgate_domain::{EffectiveAccess, ObjectAction, resolve_effective_access};
use tracing::debug;

use crate::{AccessRequestRepository, BucketCatalog, BucketDescriptor, Clock};

/// Catalog bucket paired with the caller's effective access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBucketAccess {
    /// Catalog entry.
    pub bucket: BucketDescriptor,
    /// Effective access at resolution time.
    pub access: EffectiveAccess,
}

/// Resolves effective bucket access from base access and active grants.
///
/// Expiry is evaluated against the clock on every call; nothing is cached.
#[derive(Clone)]
pub struct PermissionService {
    repository: Arc<dyn AccessRequestRepository>,
    catalog: Arc<dyn BucketCatalog>,
    clock: Arc<dyn Clock>,
}

impl PermissionService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn AccessRequestRepository>,
        catalog: Arc<dyn BucketCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            catalog,
            clock,
        }
    }

    /// Resolves the caller's effective access on one bucket.
    pub async fn resolve(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
    ) -> AppResult<ResolvedBucketAccess> {
        let bucket = self
            .catalog
            .find_bucket(bucket_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("bucket '{bucket_name}'")))?;

        self.resolve_for(actor, bucket).await
    }

    /// Resolves access and fails with `Forbidden` when `action` is not allowed.
    pub async fn require(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        action: ObjectAction,
    ) -> AppResult<ResolvedBucketAccess> {
        let resolved = self.resolve(actor, bucket_name).await?;

        if !resolved.access.allows(action) {
            return Err(AppError::Forbidden(format!(
                "subject '{}' has no {} access to bucket '{bucket_name}'",
                actor.subject(),
                action.as_str()
            )));
        }

        Ok(resolved)
    }

    /// Lists catalog buckets with the caller's access, optionally by region.
    pub async fn list_buckets(
        &self,
        actor: &UserIdentity,
        region: Option<&str>,
    ) -> AppResult<Vec<ResolvedBucketAccess>> {
        let mut buckets = self.catalog.list_buckets().await?;
        if let Some(region) = region {
            buckets.retain(|bucket| bucket.region == region);
        }
        buckets.sort_by(|left, right| left.name.cmp(&right.name));

        let mut resolved = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            resolved.push(self.resolve_for(actor, bucket).await?);
        }

        Ok(resolved)
    }

    async fn resolve_for(
        &self,
        actor: &UserIdentity,
        bucket: BucketDescriptor,
    ) -> AppResult<ResolvedBucketAccess> {
        let grants = self
            .repository
            .list_approved_for_bucket(bucket.name.as_str(), actor.subject())
            .await?;

        let access = resolve_effective_access(
            actor.subject(),
            bucket.name.as_str(),
            bucket.base_access,
            &grants,
            self.clock.now(),
        );

        debug!(
            subject = actor.subject(),
            bucket = bucket.name.as_str(),
            write = access.write,
            candidate_grants = grants.len(),
            "resolved bucket access"
        );

        Ok(ResolvedBucketAccess { bucket, access })
    }
}
