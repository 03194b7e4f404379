//! Job store error types.

use lyricflow_models::{JobId, TransitionError};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Rejected update for job {job_id}: {source}")]
    Transition {
        job_id: JobId,
        #[source]
        source: TransitionError,
    },
}

impl StoreError {
    pub fn transition(job_id: &JobId, source: TransitionError) -> Self {
        Self::Transition {
            job_id: job_id.clone(),
            source,
        }
    }

    /// Whether the job does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::JobNotFound(_))
    }
}
