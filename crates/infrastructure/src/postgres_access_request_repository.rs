use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;

use bucketgate_application::{AccessRequestInsertReport, AccessRequestRepository};
use bucketgate_core::{AppError, AppResult, NonEmptyString};
use bucketgate_domain::{
    AccessDuration, AccessRequest, AccessRequestId, AccessRequestStatus, BucketRef,
    RequesterSnapshot,
};


const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        bucket_name,
        region,
        reason,
        duration_minutes,
        status,
        requested_at,
        expires_at,
        denial_reason,
        user_id,
        user_name,
        user_email,
        user_image
    FROM access_requests
"#;

/// PostgreSQL-backed access request repository.
#[derive(Clone)]
pub struct PostgresAccessRequestRepository {
    pool: PgPool,
}

impl PostgresAccessRequestRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, query: &str, context: &str) -> AppResult<Vec<AccessRequest>> {
        sqlx::query_as::<_, AccessRequestRow>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Storage(format!("failed to {context}: {error}")))?
            .into_iter()
            .map(AccessRequest::try_from)
            .collect()
    }
}

#[derive(Debug, FromRow)]
struct AccessRequestRow {
    id: uuid::Uuid,
    bucket_name: String,
    region: String,
    reason: String,
    duration_minutes: i32,
    status: String,
    requested_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    denial_reason: Option<String>,
    user_id: String,
    user_name: String,
    user_email: Option<String>,
    user_image: Option<String>,
}

impl TryFrom<AccessRequestRow> for AccessRequest {
    type Error = AppError;

    fn try_from(row: AccessRequestRow) -> Result<Self, Self::Error> {
        AccessRequest::from_persisted(
            AccessRequestId::from_uuid(row.id),
            BucketRef::new(row.bucket_name, row.region)?,
            NonEmptyString::for_field("reason", row.reason)?,
            AccessDuration::from_minutes(i64::from(row.duration_minutes))?,
            AccessRequestStatus::from_str(row.status.as_str())?,
            row.requested_at,
            row.expires_at,
            row.denial_reason,
            RequesterSnapshot::new(row.user_id, row.user_name, row.user_email, row.user_image),
        )
    }
}

#[async_trait]
impl AccessRequestRepository for PostgresAccessRequestRepository {
    async fn insert_batch(
        &self,
        requests: Vec<AccessRequest>,
    ) -> AppResult<AccessRequestInsertReport> {
        let mut report = AccessRequestInsertReport::default();

        for request in requests {
            let insert = sqlx::query(
                r#"
                INSERT INTO access_requests (
                    id,
                    bucket_name,
                    region,
                    reason,
                    duration_minutes,
                    status,
                    requested_at,
                    expires_at,
                    denial_reason,
                    user_id,
                    user_name,
                    user_email,
                    user_image
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(request.id().as_uuid())
            .bind(request.bucket().bucket_name())
            .bind(request.bucket().region())
            .bind(request.reason())
            .bind(i32::try_from(request.duration().minutes()).unwrap_or(i32::MAX))
            .bind(request.status().as_str())
            .bind(request.requested_at())
            .bind(request.expires_at())
            .bind(request.denial_reason())
            .bind(request.requester().user_id())
            .bind(request.requester().user_name())
            .bind(request.requester().user_email())
            .bind(request.requester().user_image())
            .execute(&self.pool)
            .await;

            match insert {
                Ok(_) => report.inserted.push(request.id()),
                Err(error) => {
                    warn!(
                        access_request_id = %request.id(),
                        inserted = report.inserted.len(),
                        error = %error,
                        "access request insert failed"
                    );
                    report.failure = Some(format!("failed to insert access request: {error}"));
                    break;
                }
            }
        }

        Ok(report)
    }

    async fn find_by_id(&self, id: AccessRequestId) -> AppResult<Option<AccessRequest>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1");
        sqlx::query_as::<_, AccessRequestRow>(query.as_str())
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Storage(format!("failed to find access request: {error}")))?
            .map(AccessRequest::try_from)
            .transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<AccessRequest>> {
        let query = format!("{SELECT_COLUMNS} ORDER BY requested_at DESC, id");
        self.fetch_all(query.as_str(), "list access requests").await
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<AccessRequest>> {
        let query = format!("{SELECT_COLUMNS} WHERE user_id = $1 ORDER BY requested_at DESC, id");
        sqlx::query_as::<_, AccessRequestRow>(query.as_str())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to list access requests for user: {error}"))
            })?
            .into_iter()
            .map(AccessRequest::try_from)
            .collect()
    }

    async fn list_active_at(&self, now: DateTime<Utc>) -> AppResult<Vec<AccessRequest>> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE status = 'approved' AND expires_at > $1 ORDER BY expires_at ASC, id"
        );
        sqlx::query_as::<_, AccessRequestRow>(query.as_str())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to list active access grants: {error}"))
            })?
            .into_iter()
            .map(AccessRequest::try_from)
            .collect()
    }

    async fn list_approved_for_bucket(
        &self,
        bucket_name: &str,
        user_id: &str,
    ) -> AppResult<Vec<AccessRequest>> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE status = 'approved' AND bucket_name = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, AccessRequestRow>(query.as_str())
            .bind(bucket_name)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to list bucket access grants: {error}"))
            })?
            .into_iter()
            .map(AccessRequest::try_from)
            .collect()
    }

    async fn save_decision(&self, request: &AccessRequest) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE access_requests
            SET status = $2, expires_at = $3, denial_reason = $4
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request.id().as_uuid())
        .bind(request.status().as_str())
        .bind(request.expires_at())
        .bind(request.denial_reason())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to save access request decision: {error}"))
        })?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        match self.find_by_id(request.id()).await? {
            Some(stored) => Err(AppError::Conflict(format!(
                "access request '{}' was already {}",
                stored.id(),
                stored.status().as_str()
            ))),
            None => Err(AppError::NotFound(format!(
                "access request '{}' not found",
                request.id()
            ))),
        }
    }
}
