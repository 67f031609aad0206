use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Multipart, Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use bucketgate_application::{UploadItem, UploadProgress, UploadProgressObserver};
use bucketgate_core::{AppError, UserIdentity};
use bucketgate_domain::ObjectKey;
use tracing::info;

use crate::dto::{
    BatchDeleteRequest, BatchResultResponse, CreateFolderRequest, ObjectKeyResponse,
    ObjectListQuery, ObjectListingResponse, ObjectUrlQuery, ObjectUrlResponse, UploadQuery,
};
use crate::error::{ApiResult, BatchApiError};
use crate::extract::ApiJson;
use crate::state::AppState;

/// Display hint header: the caller may upload and create folders.
pub const WRITE_ACCESS_HEADER: &str = "x-bucketgate-write-access";
/// Display hint header: the caller may delete objects.
pub const DELETE_ACCESS_HEADER: &str = "x-bucketgate-delete-access";

struct TracingUploadObserver<'a> {
    bucket_name: &'a str,
}

impl UploadProgressObserver for TracingUploadObserver<'_> {
    fn on_progress(&self, progress: &UploadProgress) {
        info!(
            bucket = self.bucket_name,
            key = progress.key.as_str(),
            phase = ?progress.phase,
            file_number = progress.file_number,
            total_files = progress.total_files,
            completed_files = progress.completed_files(),
            file_bytes_sent = progress.file_bytes_sent,
            file_bytes_total = progress.file_bytes_total,
            bytes_sent = progress.bytes_sent,
            bytes_total = progress.bytes_total,
            "upload progress"
        );
    }
}

fn flag(value: bool) -> HeaderValue {
    HeaderValue::from_static(if value { "true" } else { "false" })
}

pub async fn list_objects_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(bucket_name): Path<String>,
    Query(query): Query<ObjectListQuery>,
) -> ApiResult<([(HeaderName, HeaderValue); 2], Json<ObjectListingResponse>)> {
    let listing = state
        .object_gateway
        .list_objects(
            &user,
            bucket_name.as_str(),
            query.path.as_deref().unwrap_or_default(),
        )
        .await?;

    let headers = [
        (
            HeaderName::from_static(WRITE_ACCESS_HEADER),
            flag(listing.access.write),
        ),
        (
            HeaderName::from_static(DELETE_ACCESS_HEADER),
            flag(listing.access.delete),
        ),
    ];

    Ok((headers, Json(listing.into())))
}

pub async fn object_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((bucket_name, key)): Path<(String, String)>,
    Query(query): Query<ObjectUrlQuery>,
) -> ApiResult<Json<ObjectUrlResponse>> {
    let url = state
        .object_gateway
        .object_url(
            &user,
            bucket_name.as_str(),
            key.as_str(),
            query.for_download.unwrap_or(false),
        )
        .await?;

    Ok(Json(url.into()))
}

pub async fn put_object_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((bucket_name, key)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ObjectKeyResponse>)> {
    let key = state
        .object_gateway
        .put_object(&user, bucket_name.as_str(), key.as_str(), body.to_vec())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ObjectKeyResponse {
            key: key.to_string(),
        }),
    ))
}

pub async fn delete_object_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((bucket_name, key)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .object_gateway
        .delete_object(&user, bucket_name.as_str(), key.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_folder_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(bucket_name): Path<String>,
    ApiJson(payload): ApiJson<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ObjectKeyResponse>)> {
    let key = state
        .object_gateway
        .create_folder(
            &user,
            bucket_name.as_str(),
            payload.prefix.as_str(),
            payload.name.as_str(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ObjectKeyResponse {
            key: key.to_string(),
        }),
    ))
}

pub async fn batch_delete_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(bucket_name): Path<String>,
    ApiJson(payload): ApiJson<BatchDeleteRequest>,
) -> Result<Json<BatchResultResponse>, BatchApiError> {
    let summary = state
        .batch_coordinator
        .delete_concurrent(&user, bucket_name.as_str(), payload.keys)
        .await?;

    Ok(Json(summary.into()))
}

pub async fn batch_upload_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(bucket_name): Path<String>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<BatchResultResponse>, BatchApiError> {
    let prefix = query.path.unwrap_or_default();
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::Validation(format!("invalid multipart body: {error}")))?
    {
        let Some(file_name) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let body = field.bytes().await.map_err(|error| {
            AppError::Validation(format!("failed to read upload '{file_name}': {error}"))
        })?;
        let key = ObjectKey::under_prefix(prefix.as_str(), file_name.as_str())?;

        items.push(UploadItem {
            key: key.to_string(),
            body: body.to_vec(),
        });
    }

    let observer = TracingUploadObserver {
        bucket_name: bucket_name.as_str(),
    };
    let summary = state
        .batch_coordinator
        .upload_sequential(&user, bucket_name.as_str(), items, &observer)
        .await?;

    Ok(Json(summary.into()))
}
