mod access_requests;
mod auth;
mod buckets;
mod common;
mod objects;

pub use access_requests::{
    AccessRequestResponse, BucketRequestDto, CreateAccessRequestsRequest,
    CreateAccessRequestsResponse, DenyAccessRequestRequest,
};
pub use auth::BootstrapRequest;
pub use buckets::{BucketListQuery, BucketResponse, RegionResponse};
pub use common::{HealthResponse, UserIdentityResponse};
pub use objects::{
    BatchDeleteRequest, BatchResultResponse, CreateFolderRequest, ObjectEntryResponse,
    ObjectKeyResponse, ObjectListQuery, ObjectListingResponse, ObjectUrlQuery, ObjectUrlResponse,
    UploadQuery,
};

#[cfg(test)]
mod tests {
    use super::{
        AccessRequestResponse, BatchDeleteRequest, BatchResultResponse, BucketRequestDto,
        BucketResponse, CreateAccessRequestsRequest, CreateAccessRequestsResponse,
        CreateFolderRequest, DenyAccessRequestRequest, HealthResponse, ObjectEntryResponse,
        ObjectKeyResponse, ObjectListingResponse, ObjectUrlResponse, RegionResponse,
        UserIdentityResponse,
    };

    use crate::error::{
        DeleteFailedResponse, DeleteFailureResponse, ErrorResponse, PartialWriteErrorResponse,
        UploadAbortedResponse,
    };
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        BucketRequestDto::export(&config)?;
        CreateAccessRequestsRequest::export(&config)?;
        CreateAccessRequestsResponse::export(&config)?;
        DenyAccessRequestRequest::export(&config)?;
        AccessRequestResponse::export(&config)?;
        BucketResponse::export(&config)?;
        RegionResponse::export(&config)?;
        ObjectEntryResponse::export(&config)?;
        ObjectListingResponse::export(&config)?;
        ObjectUrlResponse::export(&config)?;
        ObjectKeyResponse::export(&config)?;
        CreateFolderRequest::export(&config)?;
        BatchDeleteRequest::export(&config)?;
        BatchResultResponse::export(&config)?;
        HealthResponse::export(&config)?;
        UserIdentityResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        PartialWriteErrorResponse::export(&config)?;
        UploadAbortedResponse::export(&config)?;
        DeleteFailureResponse::export(&config)?;
        DeleteFailedResponse::export(&config)?;

        Ok(())
    }
}
