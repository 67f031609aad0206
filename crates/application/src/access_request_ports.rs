mod inputs;
mod repository;

pub use inputs::{
    AccessRequestBatchOutcome, AccessRequestInsertReport, BucketRequestItem,
    CreateAccessRequestsInput,
};
pub use repository::AccessRequestRepository;
