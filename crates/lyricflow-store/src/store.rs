//! Job store abstraction.

use async_trait::async_trait;
use lyricflow_models::{JobId, JobRecord, JobUpdate};

use crate::error::StoreResult;

/// Process-wide table of job status records.
///
/// Updates are expressed as [`JobUpdate`] values rather than closures so a
/// persistent implementation can record and replay them.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Current record for `job_id`, if the job exists.
    async fn get(&self, job_id: &JobId) -> StoreResult<Option<JobRecord>>;

    /// Insert or replace the record for `job_id`.
    async fn put(&self, job_id: JobId, record: JobRecord) -> StoreResult<()>;

    /// Apply `update` to an existing record and return the new state.
    ///
    /// Fails with `JobNotFound` for unknown ids and with `Transition` when
    /// the record rejects the update; a rejected update leaves the record
    /// untouched.
    async fn update(&self, job_id: &JobId, update: JobUpdate) -> StoreResult<JobRecord>;

    /// Number of jobs known to the store.
    async fn len(&self) -> usize;
}
