//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod access_request;
mod object;
mod region;
mod security;

pub use access::{BaseAccess, EffectiveAccess, ObjectAction, resolve_effective_access};
pub use access_request::{
    AccessDuration, AccessRequest, AccessRequestId, AccessRequestStatus, BucketRef,
    RequesterSnapshot,
};
pub use object::{ObjectKey, normalize_prefix};
pub use region::Region;
pub use security::{Capability, Role};
