use std::sync::Arc;

use bucketgate_application::{
    AccessRequestRepository, AccessRequestService, BatchCoordinator, Clock,
    ObjectOperationGateway, PermissionService,
};
use bucketgate_core::AppError;
use bucketgate_infrastructure::{InMemoryObjectStore, StaticBucketCatalog, SystemClock};
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(
    config: &ApiConfig,
    repository: Arc<dyn AccessRequestRepository>,
) -> Result<AppState, AppError> {
    let catalog = StaticBucketCatalog::parse(config.bucket_catalog.as_str())?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let object_store = Arc::new(InMemoryObjectStore::new(clock.clone()));

    let permission_service =
        PermissionService::new(repository.clone(), Arc::new(catalog), clock.clone());
    let object_gateway = ObjectOperationGateway::new(
        permission_service.clone(),
        object_store,
        config.presigned_url_ttl_seconds,
    );
    let batch_coordinator =
        BatchCoordinator::new(object_gateway.clone(), config.delete_batch_concurrency);

    info!(
        delete_batch_concurrency = config
            .delete_batch_concurrency
            .map_or(0, std::num::NonZeroUsize::get),
        presigned_url_ttl_seconds = config.presigned_url_ttl_seconds,
        "application services ready"
    );

    Ok(AppState {
        access_request_service: AccessRequestService::new(repository, clock),
        permission_service,
        object_gateway,
        batch_coordinator,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    })
}
