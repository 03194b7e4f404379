//! Structured job logging utilities.

use tracing::{error, info, Span};

use lyricflow_models::JobId;

/// Logs job lifecycle events with the job id and operation attached.
#[derive(Debug, Clone)]
pub struct JobLogger {
    job_id: String,
    operation: &'static str,
}

impl JobLogger {
    pub fn new(job_id: &JobId, operation: &'static str) -> Self {
        Self {
            job_id: job_id.to_string(),
            operation,
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            job_id = %self.job_id,
            operation = self.operation,
            "Job started: {}", message
        );
    }

    /// Log a progress milestone.
    pub fn log_progress(&self, progress: u8, message: &str) {
        info!(
            job_id = %self.job_id,
            operation = self.operation,
            progress,
            "Job progress: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            job_id = %self.job_id,
            operation = self.operation,
            "Job error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            job_id = %self.job_id,
            operation = self.operation,
            "Job completed: {}", message
        );
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Span carrying the job id for everything logged inside the job task.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "job",
            job_id = %self.job_id,
            operation = self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_logger_creation() {
        let job_id = JobId::new();
        let logger = JobLogger::new(&job_id, "lyric_video");

        assert_eq!(logger.job_id(), job_id.to_string());
    }
}
