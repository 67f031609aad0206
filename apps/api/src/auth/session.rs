use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use bucketgate_application::resolve_role;
use bucketgate_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::dto::UserIdentityResponse;
use crate::error::ApiResult;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let capabilities = resolve_role(&user)
        .map(|role| role.capabilities().to_vec())
        .unwrap_or_default();

    Ok(Json(UserIdentityResponse::from_identity_with_capabilities(
        user,
        capabilities,
    )))
}
