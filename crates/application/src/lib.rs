//! Application services and ports.

#![forbid(unsafe_code)]

mod access_policy;
mod access_request_ports;
mod access_request_service;
mod batch_coordinator;
mod object_gateway;
mod object_ports;
mod permission_service;

#[cfg(test)]
mod test_support;

pub use access_policy::{require_capability, resolve_role};
pub use access_request_ports::{
    AccessRequestBatchOutcome, AccessRequestInsertReport, AccessRequestRepository,
    BucketRequestItem, CreateAccessRequestsInput,
};
pub use access_request_service::AccessRequestService;
pub use batch_coordinator::{
    BatchCoordinator, BatchError, BatchSummary, DeleteFailure, UploadItem, UploadPhase,
    UploadProgress, UploadProgressObserver,
};
pub use object_gateway::{ObjectListing, ObjectOperationGateway, ObjectUrl};
pub use object_ports::{BucketCatalog, BucketDescriptor, Clock, ObjectEntry, ObjectStore};
pub use permission_service::{PermissionService, ResolvedBucketAccess};
