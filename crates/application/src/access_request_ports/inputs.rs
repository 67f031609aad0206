use bucketgate_domain::AccessRequestId;

/// One bucket named in an access request submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRequestItem {
    /// Target bucket name.
    pub bucket_name: String,
    /// Target bucket region.
    pub region: String,
}

/// Input payload for creating access requests for one or more buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccessRequestsInput {
    /// Buckets to request write access for; one record is created per item.
    pub buckets: Vec<BucketRequestItem>,
    /// Justification shared by every created record.
    pub reason: String,
    /// Requested duration shared by every created record.
    pub duration_minutes: i64,
}

/// Result of a non-transactional batch insert.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessRequestInsertReport {
    /// Records durably written, in submission order.
    pub inserted: Vec<AccessRequestId>,
    /// Storage failure that stopped the batch, when present.
    pub failure: Option<String>,
}

/// Structured outcome of access request creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequestBatchOutcome {
    /// Number of records the caller asked for.
    pub attempted: usize,
    /// Number of records durably written.
    pub succeeded: usize,
    /// Identifiers of the written records.
    pub ids: Vec<AccessRequestId>,
}

impl AccessRequestBatchOutcome {
    /// Returns whether every requested record was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.attempted == self.succeeded
    }
}
