use std::num::NonZeroUsize;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{info, warn};

use bucketgate_core::{AppError, UserIdentity};
use bucketgate_domain::{ObjectAction, ObjectKey};

use crate::ObjectOperationGateway;

/// One file in a sequential upload batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Destination key.
    pub key: String,
    /// File contents.
    pub body: Vec<u8>,
}

/// Point in a single file's transfer that a progress event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// The file is about to be sent.
    Started,
    /// The file was stored.
    Completed,
}

/// Progress snapshot for one file and for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    /// Key of the current file.
    pub key: String,
    /// Transfer phase of the current file.
    pub phase: UploadPhase,
    /// One-based position of the current file.
    pub file_number: usize,
    /// Number of files in the batch.
    pub total_files: usize,
    /// Bytes of the current file sent so far.
    pub file_bytes_sent: u64,
    /// Size of the current file.
    pub file_bytes_total: u64,
    /// Bytes of the batch sent so far.
    pub bytes_sent: u64,
    /// Bytes in the whole batch.
    pub bytes_total: u64,
}

impl UploadProgress {
    /// Files fully stored so far.
    #[must_use]
    pub fn completed_files(&self) -> usize {
        match self.phase {
            UploadPhase::Started => self.file_number.saturating_sub(1),
            UploadPhase::Completed => self.file_number,
        }
    }
}

/// Receives upload progress.
pub trait UploadProgressObserver: Send + Sync {
    /// Called when each file starts and again when it is stored.
    fn on_progress(&self, progress: &UploadProgress);
}

impl UploadProgressObserver for () {
    fn on_progress(&self, _progress: &UploadProgress) {}
}

/// Summary of a fully successful batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Keys that were written or removed.
    pub keys: Vec<String>,
}

/// One failed delete inside a concurrent batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    /// Key that failed.
    pub key: String,
    /// Failure message.
    pub message: String,
}

/// Batch-level failure.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Batch rejected before any item was attempted.
    #[error(transparent)]
    Request(#[from] AppError),
    /// Sequential upload stopped at the first failure.
    #[error("upload stopped at '{failed_key}': {source}")]
    UploadAborted {
        /// Key that failed.
        failed_key: String,
        /// Keys uploaded before the failure; they are kept.
        uploaded: Vec<String>,
        /// Keys never attempted.
        not_attempted: Vec<String>,
        /// Underlying failure.
        source: AppError,
    },
    /// At least one concurrent delete failed; successful deletes stand.
    #[error("{} of {attempted} deletes failed", failures.len())]
    DeleteFailed {
        /// Number of deletes attempted.
        attempted: usize,
        /// Keys that were removed.
        deleted: Vec<String>,
        /// Keys that failed, with reasons.
        failures: Vec<DeleteFailure>,
    },
}

/// Multi-object operations on top of the object gateway.
///
/// Uploads run one at a time in order and stop at the first failure.
/// Deletes run concurrently and are not rolled back on partial failure.
/// The batch is checked once up front and every item is re-checked by the
/// gateway as it runs.
#[derive(Clone)]
pub struct BatchCoordinator {
    gateway: ObjectOperationGateway,
    delete_concurrency: Option<NonZeroUsize>,
}

impl BatchCoordinator {
    /// Creates a coordinator; `None` leaves delete fan-out unbounded.
    #[must_use]
    pub fn new(gateway: ObjectOperationGateway, delete_concurrency: Option<NonZeroUsize>) -> Self {
        Self {
            gateway,
            delete_concurrency,
        }
    }

    /// Uploads `items` in order, reporting progress around each file.
    pub async fn upload_sequential(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        items: Vec<UploadItem>,
        observer: &dyn UploadProgressObserver,
    ) -> Result<BatchSummary, BatchError> {
        if items.is_empty() {
            return Err(AppError::Validation("upload batch must not be empty".to_owned()).into());
        }
        for item in &items {
            ObjectKey::new(item.key.as_str())?;
        }
        self.gateway
            .authorize(actor, bucket_name, ObjectAction::Write)
            .await?;

        let total_files = items.len();
        let bytes_total: u64 = items.iter().map(|item| item.body.len() as u64).sum();
        let mut uploaded = Vec::with_capacity(total_files);
        let mut bytes_sent = 0_u64;
        let mut remaining = items.into_iter();

        while let Some(item) = remaining.next() {
            let size = item.body.len() as u64;
            let file_number = uploaded.len() + 1;
            observer.on_progress(&UploadProgress {
                key: item.key.clone(),
                phase: UploadPhase::Started,
                file_number,
                total_files,
                file_bytes_sent: 0,
                file_bytes_total: size,
                bytes_sent,
                bytes_total,
            });

            if let Err(source) = self
                .gateway
                .put_object(actor, bucket_name, item.key.as_str(), item.body)
                .await
            {
                let not_attempted: Vec<String> = remaining.map(|item| item.key).collect();
                warn!(
                    subject = actor.subject(),
                    bucket = bucket_name,
                    failed_key = item.key.as_str(),
                    uploaded = uploaded.len(),
                    not_attempted = not_attempted.len(),
                    "upload batch aborted"
                );
                return Err(BatchError::UploadAborted {
                    failed_key: item.key,
                    uploaded,
                    not_attempted,
                    source,
                });
            }

            bytes_sent += size;
            observer.on_progress(&UploadProgress {
                key: item.key.clone(),
                phase: UploadPhase::Completed,
                file_number,
                total_files,
                file_bytes_sent: size,
                file_bytes_total: size,
                bytes_sent,
                bytes_total,
            });
            uploaded.push(item.key);
        }

        info!(
            subject = actor.subject(),
            bucket = bucket_name,
            files = total_files,
            bytes_total,
            "upload batch completed"
        );

        Ok(BatchSummary { keys: uploaded })
    }

    /// Deletes `keys` concurrently and reports every failure.
    pub async fn delete_concurrent(
        &self,
        actor: &UserIdentity,
        bucket_name: &str,
        keys: Vec<String>,
    ) -> Result<BatchSummary, BatchError> {
        if keys.is_empty() {
            return Err(AppError::Validation("delete batch must not be empty".to_owned()).into());
        }

        for key in &keys {
            ObjectKey::new(key.as_str())?;
        }
        self.gateway
            .authorize(actor, bucket_name, ObjectAction::Delete)
            .await?;

        let attempted = keys.len();
        let deletes = keys.into_iter().map(|key| async move {
            let result = self
                .gateway
                .delete_object(actor, bucket_name, key.as_str())
                .await;
            (key, result)
        });

        let results = match self.delete_concurrency {
            Some(limit) => {
                stream::iter(deletes)
                    .buffer_unordered(limit.get())
                    .collect::<Vec<_>>()
                    .await
            }
            None => join_all(deletes).await,
        };

        let mut deleted = Vec::with_capacity(attempted);
        let mut failures = Vec::new();
        for (key, result) in results {
            match result {
                Ok(()) => deleted.push(key),
                Err(error) => failures.push(DeleteFailure {
                    key,
                    message: error.to_string(),
                }),
            }
        }

        if failures.is_empty() {
            info!(
                subject = actor.subject(),
                bucket = bucket_name,
                deleted = attempted,
                "delete batch completed"
            );
            return Ok(BatchSummary { keys: deleted });
        }

        warn!(
            subject = actor.subject(),
            bucket = bucket_name,
            attempted,
            failed = failures.len(),
            "delete batch partially failed"
        );

        Err(BatchError::DeleteFailed {
            attempted,
            deleted,
            failures,
        })
    }
}
