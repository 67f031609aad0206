//! Access request lifecycle: `pending` to `approved` or `denied`.
//!
//! An approved request is never mutated again. Its write-access effect lapses
//! when `expires_at` passes; no expired state is ever stored.

use std::str::FromStr;

use bucketgate_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an access request record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessRequestId(Uuid);

impl AccessRequestId {
    /// Creates a new random access request identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into an identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| AppError::Validation(format!("invalid access request id '{value}'")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccessRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccessRequestId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Decision state of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequestStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Approved; grants write access until `expires_at`.
    Approved,
    /// Denied with a reason.
    Denied,
}

impl AccessRequestStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

impl FromStr for AccessRequestStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "denied" => Ok(Self::Denied),
            _ => Err(AppError::Validation(format!(
                "unknown access request status '{value}'"
            ))),
        }
    }
}

/// Requested elevation length, bounded to 15 minutes .. 1 year inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct AccessDuration(u32);

impl AccessDuration {
    /// Shortest accepted duration in minutes.
    pub const MIN_MINUTES: u32 = 15;
    /// Longest accepted duration in minutes (365 days).
    pub const MAX_MINUTES: u32 = 365 * 24 * 60;

    /// Creates a validated duration from minutes.
    pub fn from_minutes(minutes: i64) -> AppResult<Self> {
        if minutes < i64::from(Self::MIN_MINUTES) || minutes > i64::from(Self::MAX_MINUTES) {
            return Err(AppError::Validation(
                "duration must be between 15 minutes and 1 year".to_owned(),
            ));
        }

        u32::try_from(minutes)
            .map(Self)
            .map_err(|_| AppError::Validation("duration is out of range".to_owned()))
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Returns the duration as a chrono span.
    #[must_use]
    pub fn as_chrono(&self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

impl TryFrom<i64> for AccessDuration {
    type Error = AppError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

/// Requester identity copied into the request at creation time.
///
/// Never resynchronized with the identity provider afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterSnapshot {
    user_id: String,
    user_name: String,
    user_email: Option<String>,
    user_image: Option<String>,
}

impl RequesterSnapshot {
    /// Creates a snapshot from stored values.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_email: Option<String>,
        user_image: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_email,
            user_image,
        }
    }

    /// Captures the identity currently held by the session.
    #[must_use]
    pub fn capture(identity: &UserIdentity) -> Self {
        Self::new(
            identity.subject(),
            identity.display_name(),
            identity.email().map(str::to_owned),
            identity.image().map(str::to_owned),
        )
    }

    /// Returns the requester subject.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the requester display name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        self.user_name.as_str()
    }

    /// Returns the requester email.
    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// Returns the requester avatar URL.
    #[must_use]
    pub fn user_image(&self) -> Option<&str> {
        self.user_image.as_deref()
    }
}

/// Target bucket of an access request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketRef {
    bucket_name: NonEmptyString,
    region: NonEmptyString,
}

impl BucketRef {
    /// Creates a validated bucket reference.
    pub fn new(bucket_name: impl Into<String>, region: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            bucket_name: NonEmptyString::for_field("bucket name", bucket_name)?,
            region: NonEmptyString::for_field("bucket region", region)?,
        })
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        self.bucket_name.as_str()
    }

    /// Returns the bucket region.
    #[must_use]
    pub fn region(&self) -> &str {
        self.region.as_str()
    }
}

/// Persisted request for temporary write access to one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredAccessRequest")]
pub struct AccessRequest {
    id: AccessRequestId,
    bucket: BucketRef,
    reason: NonEmptyString,
    duration: AccessDuration,
    status: AccessRequestStatus,
    requested_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    denial_reason: Option<String>,
    requester: RequesterSnapshot,
}

/// Unchecked field set; deserialized requests go through `from_persisted`.
#[derive(Deserialize)]
struct StoredAccessRequest {
    id: AccessRequestId,
    bucket: BucketRef,
    reason: NonEmptyString,
    duration: AccessDuration,
    status: AccessRequestStatus,
    requested_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    denial_reason: Option<String>,
    requester: RequesterSnapshot,
}

impl TryFrom<StoredAccessRequest> for AccessRequest {
    type Error = AppError;

    fn try_from(stored: StoredAccessRequest) -> Result<Self, Self::Error> {
        Self::from_persisted(
            stored.id,
            stored.bucket,
            stored.reason,
            stored.duration,
            stored.status,
            stored.requested_at,
            stored.expires_at,
            stored.denial_reason,
            stored.requester,
        )
    }
}

impl AccessRequest {
    /// Creates a new pending request.
    #[must_use]
    pub fn new_pending(
        bucket: BucketRef,
        reason: NonEmptyString,
        duration: AccessDuration,
        requester: RequesterSnapshot,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccessRequestId::new(),
            bucket,
            reason,
            duration,
            status: AccessRequestStatus::Pending,
            requested_at,
            expires_at: None,
            denial_reason: None,
            requester,
        }
    }

    /// Rebuilds a request from storage, checking the decision invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: AccessRequestId,
        bucket: BucketRef,
        reason: NonEmptyString,
        duration: AccessDuration,
        status: AccessRequestStatus,
        requested_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        denial_reason: Option<String>,
        requester: RequesterSnapshot,
    ) -> AppResult<Self> {
        let consistent = match status {
            AccessRequestStatus::Pending => expires_at.is_none() && denial_reason.is_none(),
            AccessRequestStatus::Approved => expires_at.is_some() && denial_reason.is_none(),
            AccessRequestStatus::Denied => expires_at.is_none() && denial_reason.is_some(),
        };

        if !consistent {
            return Err(AppError::Validation(format!(
                "access request '{id}' has inconsistent decision fields for status '{}'",
                status.as_str()
            )));
        }

        Ok(Self {
            id,
            bucket,
            reason,
            duration,
            status,
            requested_at,
            expires_at,
            denial_reason,
            requester,
        })
    }

    /// Approves a pending request; access lasts `duration` from `decided_at`.
    pub fn approve(mut self, decided_at: DateTime<Utc>) -> AppResult<Self> {
        self.ensure_pending()?;

        self.status = AccessRequestStatus::Approved;
        self.expires_at = Some(decided_at + self.duration.as_chrono());
        Ok(self)
    }

    /// Denies a pending request with a reason.
    pub fn deny(mut self, denial_reason: NonEmptyString) -> AppResult<Self> {
        self.ensure_pending()?;

        self.status = AccessRequestStatus::Denied;
        self.denial_reason = Some(denial_reason.into());
        Ok(self)
    }

    /// Returns whether this request confers write access at `now`.
    ///
    /// `expires_at` itself is already outside the active window.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == AccessRequestStatus::Approved
            && self.expires_at.is_some_and(|expires_at| expires_at > now)
    }

    fn ensure_pending(&self) -> AppResult<()> {
        if self.status != AccessRequestStatus::Pending {
            return Err(AppError::Conflict(format!(
                "access request '{}' was already {}",
                self.id,
                self.status.as_str()
            )));
        }

        Ok(())
    }

    /// Returns the request identifier.
    #[must_use]
    pub fn id(&self) -> AccessRequestId {
        self.id
    }

    /// Returns the target bucket.
    #[must_use]
    pub fn bucket(&self) -> &BucketRef {
        &self.bucket
    }

    /// Returns the justification text.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Returns the requested duration.
    #[must_use]
    pub fn duration(&self) -> AccessDuration {
        self.duration
    }

    /// Returns the decision state.
    #[must_use]
    pub fn status(&self) -> AccessRequestStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Returns the expiry, set only on approval.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the denial reason, set only on denial.
    #[must_use]
    pub fn denial_reason(&self) -> Option<&str> {
        self.denial_reason.as_deref()
    }

    /// Returns the requester snapshot.
    #[must_use]
    pub fn requester(&self) -> &RequesterSnapshot {
        &self.requester
    }
}
