//! Application state.

use std::path::Path;
use std::sync::Arc;

use lyricflow_store::{InMemoryJobStore, JobStore};
use lyricflow_worker::{JobExecutor, RenderConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn JobStore>,
    pub executor: JobExecutor,
}

impl AppState {
    /// Create state backed by an in-memory job store.
    pub fn new(config: ApiConfig, render: RenderConfig) -> Self {
        Self::with_store(config, render, Arc::new(InMemoryJobStore::new()))
    }

    /// Create state around an existing job store.
    pub fn with_store(config: ApiConfig, render: RenderConfig, store: Arc<dyn JobStore>) -> Self {
        let executor = JobExecutor::new(render, Arc::clone(&store));
        Self {
            config,
            store,
            executor,
        }
    }

    /// Directory receiving uploaded audio.
    pub fn upload_dir(&self) -> &Path {
        &self.executor.config().upload_dir
    }

    /// Directory holding rendered videos.
    pub fn output_dir(&self) -> &Path {
        &self.executor.config().output_dir
    }
}
