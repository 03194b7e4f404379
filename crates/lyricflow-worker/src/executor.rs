//! Job executor.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use lyricflow_models::{GenerateRequest, JobId};
use lyricflow_store::JobStore;

use crate::assembler::VideoAssembler;
use crate::config::RenderConfig;

/// Spawns one detached assembler task per submitted job.
///
/// There is no concurrency cap, queue or cancellation: each job runs to
/// completion or failure on its own task, and the job store is the only
/// channel back to the submitter.
#[derive(Clone)]
pub struct JobExecutor {
    assembler: VideoAssembler,
}

impl JobExecutor {
    pub fn new(config: RenderConfig, store: Arc<dyn JobStore>) -> Self {
        Self {
            assembler: VideoAssembler::new(Arc::new(config), store),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.assembler.config()
    }

    /// Start assembling `job_id` in the background.
    ///
    /// The caller must have inserted the queued record beforehand.
    pub fn spawn(&self, job_id: JobId, request: GenerateRequest) -> JoinHandle<()> {
        debug!(job_id = %job_id, "Spawning assembler task");
        let assembler = self.assembler.clone();
        tokio::spawn(async move { assembler.run(job_id, request).await })
    }
}
