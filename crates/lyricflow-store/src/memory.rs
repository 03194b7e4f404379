//! In-memory job store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use lyricflow_models::{JobId, JobRecord, JobUpdate};

use crate::error::{StoreError, StoreResult};
use crate::store::JobStore;

/// Job table held in process memory. Records are lost on restart and never
/// evicted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn get(&self, job_id: &JobId) -> StoreResult<Option<JobRecord>> {
        Ok(self.jobs.read().await.get(job_id).cloned())
    }

    async fn put(&self, job_id: JobId, record: JobRecord) -> StoreResult<()> {
        debug!(job_id = %job_id, status = record.status.as_str(), "Storing job record");
        self.jobs.write().await.insert(job_id, record);
        Ok(())
    }

    async fn update(&self, job_id: &JobId, update: JobUpdate) -> StoreResult<JobRecord> {
        let mut jobs = self.jobs.write().await;
        let record = jobs
            .get_mut(job_id)
            .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;

        // Apply to a copy so a rejected update cannot leave partial state
        let mut next = record.clone();
        if let Err(e) = next.apply(update) {
            warn!(job_id = %job_id, error = %e, "Rejected job update");
            return Err(StoreError::transition(job_id, e));
        }

        *record = next.clone();
        Ok(next)
    }

    async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyricflow_models::JobStatus;
    use tokio_test::{assert_err, assert_ok};

    async fn store_with_job() -> (InMemoryJobStore, JobId) {
        let store = InMemoryJobStore::new();
        let job_id = JobId::new();
        assert_ok!(store.put(job_id.clone(), JobRecord::queued()).await);
        (store, job_id)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (store, job_id) = store_with_job().await;

        let record = store.get(&job_id).await.unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Queued);
        assert_eq!(record.progress, 0);
        assert_eq!(store.len().await, 1);
        assert!(store.get(&JobId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_lifecycle() {
        let (store, job_id) = store_with_job().await;

        let record = store.update(&job_id, JobUpdate::started(10)).await.unwrap();
        assert_eq!(record.status, JobStatus::Processing);
        assert_eq!(record.progress, 10);

        store.update(&job_id, JobUpdate::progress(40)).await.unwrap();
        let record = store
            .update(&job_id, JobUpdate::completed(job_id.download_url()))
            .await
            .unwrap();
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.video_url, Some(job_id.download_url()));

        assert_eq!(store.get(&job_id).await.unwrap().unwrap(), record);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_record() {
        let (store, job_id) = store_with_job().await;
        store.update(&job_id, JobUpdate::started(10)).await.unwrap();
        store.update(&job_id, JobUpdate::failed("boom")).await.unwrap();

        let before = store.get(&job_id).await.unwrap().unwrap();
        let err = assert_err!(store.update(&job_id, JobUpdate::progress(90)).await);
        assert!(matches!(err, StoreError::Transition { .. }));
        assert_eq!(store.get(&job_id).await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_unknown_job() {
        let store = InMemoryJobStore::new();
        let err = assert_err!(store.update(&JobId::new(), JobUpdate::started(10)).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_jobs_are_independent() {
        let store = InMemoryJobStore::new();
        let ids: Vec<JobId> = (0..8).map(|_| JobId::new()).collect();

        let mut handles = Vec::new();
        for id in ids.clone() {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(id.clone(), JobRecord::queued()).await.unwrap();
                store.update(&id, JobUpdate::started(10)).await.unwrap();
                for p in [20u8, 30, 40, 80] {
                    store.update(&id, JobUpdate::progress(p)).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for id in &ids {
            let record = store.get(id).await.unwrap().unwrap();
            assert_eq!(record.progress, 80);
            assert_eq!(record.status, JobStatus::Processing);
        }
    }
}
