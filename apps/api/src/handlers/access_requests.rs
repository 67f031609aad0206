use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use bucketgate_core::UserIdentity;
use bucketgate_domain::AccessRequestId;

use crate::dto::{
    AccessRequestResponse, CreateAccessRequestsRequest, CreateAccessRequestsResponse,
    DenyAccessRequestRequest,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn create_access_requests_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreateAccessRequestsRequest>,
) -> ApiResult<(StatusCode, Json<CreateAccessRequestsResponse>)> {
    let outcome = state
        .access_request_service
        .create(&user, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccessRequestsResponse {
            success: true,
            count: outcome.succeeded,
            ids: outcome.ids.iter().map(ToString::to_string).collect(),
        }),
    ))
}

pub async fn list_access_requests_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<AccessRequestResponse>>> {
    let requests = state
        .access_request_service
        .list_for_requester(&user)
        .await?
        .into_iter()
        .map(AccessRequestResponse::from)
        .collect();

    Ok(Json(requests))
}

pub async fn list_active_access_requests_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<AccessRequestResponse>>> {
    let requests = state
        .access_request_service
        .list_active(&user)
        .await?
        .into_iter()
        .map(AccessRequestResponse::from)
        .collect();

    Ok(Json(requests))
}

pub async fn approve_access_request_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(request_id): Path<String>,
) -> ApiResult<Json<AccessRequestResponse>> {
    let request_id = AccessRequestId::parse(request_id.as_str())?;
    let approved = state
        .access_request_service
        .approve(&user, request_id)
        .await?;

    Ok(Json(approved.into()))
}

pub async fn deny_access_request_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(request_id): Path<String>,
    ApiJson(payload): ApiJson<DenyAccessRequestRequest>,
) -> ApiResult<Json<AccessRequestResponse>> {
    let request_id = AccessRequestId::parse(request_id.as_str())?;
    let denied = state
        .access_request_service
        .deny(&user, request_id, payload.reason)
        .await?;

    Ok(Json(denied.into()))
}
