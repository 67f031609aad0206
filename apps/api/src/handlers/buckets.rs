use axum::Json;
use axum::extract::{Extension, Query, State};
use bucketgate_core::UserIdentity;

use crate::dto::{BucketListQuery, BucketResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_buckets_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<BucketListQuery>,
) -> ApiResult<Json<Vec<BucketResponse>>> {
    let region = query.region.as_deref().filter(|region| !region.is_empty());
    let buckets = state
        .permission_service
        .list_buckets(&user, region)
        .await?
        .into_iter()
        .map(BucketResponse::from)
        .collect();

    Ok(Json(buckets))
}
