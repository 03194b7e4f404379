//! Job status records for progress tracking and polling.
//!
//! A [`JobRecord`] is the mutable lifecycle record of one generate request.
//! It is only ever changed through [`JobRecord::apply`], which enforces the
//! `queued -> processing -> {completed | error}` lifecycle and keeps progress
//! monotonic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Job processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is accepted, assembler not started yet
    #[default]
    Queued,
    /// Assembler is running
    Processing,
    /// Video was written and can be downloaded
    Completed,
    /// Assembly failed
    Error,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single state change emitted by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobUpdate {
    /// queued -> processing
    Started { progress: u8 },
    /// Progress milestone while processing
    Progress { progress: u8 },
    /// processing -> completed
    Completed { video_url: String },
    /// queued | processing -> error
    Failed { error: String },
}

impl JobUpdate {
    pub fn started(progress: u8) -> Self {
        Self::Started { progress }
    }

    pub fn progress(progress: u8) -> Self {
        Self::Progress { progress }
    }

    pub fn completed(video_url: impl Into<String>) -> Self {
        Self::Completed {
            video_url: video_url.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            JobUpdate::Started { .. } => "started",
            JobUpdate::Progress { .. } => "progress",
            JobUpdate::Completed { .. } => "completed",
            JobUpdate::Failed { .. } => "failed",
        }
    }
}

/// Rejected job update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Job is already {0}")]
    Terminal(JobStatus),

    #[error("Invalid transition from {from} via {update}")]
    Invalid { from: JobStatus, update: &'static str },
}

/// Status record returned verbatim by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct JobRecord {
    /// Current job status
    pub status: JobStatus,
    /// Progress percentage (0-100)
    pub progress: u8,
    /// Download path once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Error message if the job failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobRecord {
    /// Create a freshly submitted record (queued, 0%).
    pub fn queued() -> Self {
        Self::default()
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply an update, rejecting it without side effects if the transition
    /// is not allowed.
    pub fn apply(&mut self, update: JobUpdate) -> Result<(), TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::Terminal(self.status));
        }

        match (self.status, update) {
            (JobStatus::Queued, JobUpdate::Started { progress }) => {
                self.status = JobStatus::Processing;
                self.raise_progress(progress);
            }
            (JobStatus::Processing, JobUpdate::Progress { progress }) => {
                self.raise_progress(progress);
            }
            (JobStatus::Processing, JobUpdate::Completed { video_url }) => {
                self.status = JobStatus::Completed;
                self.progress = 100;
                self.video_url = Some(video_url);
            }
            (_, JobUpdate::Failed { error }) => {
                self.status = JobStatus::Error;
                self.error = Some(error);
            }
            (from, update) => {
                return Err(TransitionError::Invalid {
                    from,
                    update: update.kind(),
                });
            }
        }

        Ok(())
    }

    fn raise_progress(&mut self, progress: u8) {
        self.progress = self.progress.max(progress.min(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_record_creation() {
        let record = JobRecord::queued();
        assert_eq!(record.status, JobStatus::Queued);
        assert_eq!(record.progress, 0);
        assert!(!record.is_terminal());
    }

    #[test]
    fn test_job_status_transitions() {
        let mut record = JobRecord::queued();

        record.apply(JobUpdate::started(10)).unwrap();
        assert_eq!(record.status, JobStatus::Processing);
        assert_eq!(record.progress, 10);

        record.apply(JobUpdate::progress(50)).unwrap();
        assert_eq!(record.progress, 50);

        record
            .apply(JobUpdate::completed("/download/job.mp4"))
            .unwrap();
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.video_url.as_deref(), Some("/download/job.mp4"));
        assert!(record.is_terminal());
    }

    #[test]
    fn test_progress_never_decreases() {
        let mut record = JobRecord::queued();
        record.apply(JobUpdate::started(40)).unwrap();
        record.apply(JobUpdate::progress(30)).unwrap();
        assert_eq!(record.progress, 40);

        record.apply(JobUpdate::progress(250)).unwrap();
        assert_eq!(record.progress, 100);
    }

    #[test]
    fn test_failure_keeps_progress() {
        let mut record = JobRecord::queued();
        record.apply(JobUpdate::started(10)).unwrap();
        record.apply(JobUpdate::failed("Audio file not found")).unwrap();

        assert_eq!(record.status, JobStatus::Error);
        assert_eq!(record.progress, 10);
        assert_eq!(record.error.as_deref(), Some("Audio file not found"));
    }

    #[test]
    fn test_terminal_records_are_frozen() {
        let mut record = JobRecord::queued();
        record.apply(JobUpdate::started(10)).unwrap();
        record.apply(JobUpdate::failed("boom")).unwrap();

        let before = record.clone();
        assert_eq!(
            record.apply(JobUpdate::progress(90)),
            Err(TransitionError::Terminal(JobStatus::Error))
        );
        assert_eq!(
            record.apply(JobUpdate::completed("/download/x.mp4")),
            Err(TransitionError::Terminal(JobStatus::Error))
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_out_of_order_updates_rejected() {
        let mut record = JobRecord::queued();
        assert!(matches!(
            record.apply(JobUpdate::progress(20)),
            Err(TransitionError::Invalid { .. })
        ));
        assert!(matches!(
            record.apply(JobUpdate::completed("/download/x.mp4")),
            Err(TransitionError::Invalid { .. })
        ));

        record.apply(JobUpdate::started(10)).unwrap();
        assert!(matches!(
            record.apply(JobUpdate::started(10)),
            Err(TransitionError::Invalid { .. })
        ));
        assert_eq!(record.status, JobStatus::Processing);
    }

    #[test]
    fn test_serialized_shape() {
        let record = JobRecord::queued();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"status": "queued", "progress": 0}));

        let mut done = JobRecord::queued();
        done.apply(JobUpdate::started(10)).unwrap();
        done.apply(JobUpdate::completed("/download/j.mp4")).unwrap();
        let json = serde_json::to_value(&done).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["video_url"], "/download/j.mp4");
        assert!(json.get("error").is_none());
    }
}
