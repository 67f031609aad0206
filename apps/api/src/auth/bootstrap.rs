use axum::extract::State;
use axum::http::StatusCode;
use bucketgate_core::{AppError, UserIdentity};
use tower_sessions::Session;
use tracing::info;

use crate::dto::BootstrapRequest;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// Opens a session for an identity asserted by the upstream identity gateway.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let subject = payload.subject.trim();
    if subject.is_empty() {
        return Err(AppError::Validation("subject must not be empty".to_owned()).into());
    }

    let display_name = payload
        .display_name
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| subject.to_owned());
    let identity = UserIdentity::new(
        subject,
        display_name,
        payload.email,
        payload.image,
        payload.role,
    );

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    info!(
        subject = identity.subject(),
        role = identity.role().unwrap_or("none"),
        "session opened"
    );

    Ok(StatusCode::NO_CONTENT)
}
