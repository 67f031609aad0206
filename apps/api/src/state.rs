use bucketgate_application::{
    AccessRequestService, BatchCoordinator, ObjectOperationGateway, PermissionService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_request_service: AccessRequestService,
    pub permission_service: PermissionService,
    pub object_gateway: ObjectOperationGateway,
    pub batch_coordinator: BatchCoordinator,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
