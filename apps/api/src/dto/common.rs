use bucketgate_core::UserIdentity;
use bucketgate_domain::Capability;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub subject: String,
    pub display_name: String,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    /// Capabilities granted by the role, empty when the role is unknown.
    pub capabilities: Vec<String>,
}

impl UserIdentityResponse {
    /// Creates a response from the identity and its role capabilities.
    #[must_use]
    pub fn from_identity_with_capabilities(
        identity: UserIdentity,
        capabilities: Vec<Capability>,
    ) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            display_name: identity.display_name().to_owned(),
            email: identity.email().map(ToOwned::to_owned),
            image: identity.image().map(ToOwned::to_owned),
            role: identity.role().map(ToOwned::to_owned),
            capabilities: capabilities
                .into_iter()
                .map(|capability| capability.as_str().to_owned())
                .collect(),
        }
    }
}
