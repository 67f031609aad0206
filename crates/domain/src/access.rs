//! Effective bucket access: base access combined with active grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccessRequest;

/// Default access level of a bucket absent any temporary grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseAccess {
    /// Objects can be listed and read.
    #[default]
    ReadOnly,
    /// Objects can also be written and deleted.
    ReadWrite,
}

impl BaseAccess {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
        }
    }
}

/// Object operation checked against effective access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectAction {
    /// Listing objects or issuing a read URL.
    Read,
    /// Uploading an object or creating a folder marker.
    Write,
    /// Deleting an object.
    Delete,
}

impl ObjectAction {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

/// Resolved capabilities for one user on one bucket at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveAccess {
    /// Listing and reading objects.
    pub read: bool,
    /// Uploading objects and creating folders.
    pub write: bool,
    /// Deleting objects.
    pub delete: bool,
    /// Latest expiry among the grants that are active right now.
    pub grant_expires_at: Option<DateTime<Utc>>,
}

impl EffectiveAccess {
    /// Returns whether the action is allowed.
    #[must_use]
    pub fn allows(&self, action: ObjectAction) -> bool {
        match action {
            ObjectAction::Read => self.read,
            ObjectAction::Write => self.write,
            ObjectAction::Delete => self.delete,
        }
    }

    /// Returns the access level shown for the bucket.
    #[must_use]
    pub fn level(&self) -> BaseAccess {
        if self.write {
            BaseAccess::ReadWrite
        } else {
            BaseAccess::ReadOnly
        }
    }
}

/// Resolves effective access for `user_id` on `bucket_name` at `now`.
///
/// Write is granted when the base access is read-write or when at least one
/// approved grant for this user and bucket has `expires_at > now`. Delete
/// follows write. Overlapping grants are neither merged nor extended.
#[must_use]
pub fn resolve_effective_access(
    user_id: &str,
    bucket_name: &str,
    base_access: BaseAccess,
    candidate_grants: &[AccessRequest],
    now: DateTime<Utc>,
) -> EffectiveAccess {
    let grant_expires_at = candidate_grants
        .iter()
        .filter(|grant| {
            grant.requester().user_id() == user_id
                && grant.bucket().bucket_name() == bucket_name
                && grant.is_active_at(now)
        })
        .filter_map(AccessRequest::expires_at)
        .max();

    let write = base_access == BaseAccess::ReadWrite || grant_expires_at.is_some();

    EffectiveAccess {
        read: true,
        write,
        delete: write,
        grant_expires_at,
    }
}
