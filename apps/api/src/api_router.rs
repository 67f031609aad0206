use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use bucketgate_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;
mod object_routes;


/// Upper bound for a single upload request body.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

pub fn build_router<S>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<S>,
) -> Result<Router, AppError>
where
    S: SessionStore + Clone,
{
    let protected_routes = Router::new()
        .route(
            "/api/access-requests",
            get(handlers::access_requests::list_access_requests_handler)
                .post(handlers::access_requests::create_access_requests_handler),
        )
        .route(
            "/api/access-requests/active",
            get(handlers::access_requests::list_active_access_requests_handler),
        )
        .route(
            "/api/access-requests/{request_id}/approve",
            post(handlers::access_requests::approve_access_request_handler),
        )
        .route(
            "/api/access-requests/{request_id}/deny",
            post(handlers::access_requests::deny_access_request_handler),
        )
        .route(
            "/api/buckets",
            get(handlers::buckets::list_buckets_handler),
        )
        .merge(object_routes::build_object_routes().layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)))
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/regions", get(handlers::regions::list_regions_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        // Called server-to-server by the identity gateway; guarded by its token.
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
