use std::str::FromStr;

use bucketgate_core::AppError;
use serde::{Deserialize, Serialize};

/// Roles resolved from the identity provider's role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Account owner.
    Owner,
    /// Administrator who reviews access requests.
    Admin,
    /// Regular user browsing buckets.
    Member,
}

/// Capabilities checked by application policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Allows listing access requests of every user.
    ViewAllAccessRequests,
    /// Allows listing currently active grants.
    MonitorActiveGrants,
    /// Allows approving or denying access requests.
    DecideAccessRequests,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns the capabilities granted to this role.
    #[must_use]
    pub fn capabilities(&self) -> &'static [Capability] {
        const PRIVILEGED: &[Capability] = &[
            Capability::ViewAllAccessRequests,
            Capability::MonitorActiveGrants,
            Capability::DecideAccessRequests,
        ];

        match self {
            Self::Owner | Self::Admin => PRIVILEGED,
            Self::Member => &[],
        }
    }

    /// Returns whether this role carries the capability.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" | "user" => Ok(Self::Member),
            _ => Err(AppError::Unauthorized(format!("unknown role '{value}'"))),
        }
    }
}

impl Capability {
    /// Returns a stable value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewAllAccessRequests => "access_request.read_all",
            Self::MonitorActiveGrants => "access_request.monitor_active",
            Self::DecideAccessRequests => "access_request.decide",
        }
    }
}
