use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

pub(super) fn build_object_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/objects/{bucket}",
            get(handlers::objects::list_objects_handler),
        )
        .route(
            "/api/objects/{bucket}/folders",
            post(handlers::objects::create_folder_handler),
        )
        .route(
            "/api/objects/{bucket}/batch/delete",
            post(handlers::objects::batch_delete_handler),
        )
        .route(
            "/api/objects/{bucket}/batch/upload",
            post(handlers::objects::batch_upload_handler),
        )
        .route(
            "/api/objects/{bucket}/{*key}",
            get(handlers::objects::object_url_handler)
                .put(handlers::objects::put_object_handler)
                .delete(handlers::objects::delete_object_handler),
        )
}
