use std::sync::Arc;

use crate::application::ports::{ArtifactStore, JobStore};

/// Bounds on stored job records. When the store grows past `capacity`,
/// terminal jobs are evicted oldest-first until `floor` remain.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    pub capacity: usize,
    pub floor: usize,
}

/// Trims the job store and the artifact tree of evicted jobs. Runs after
/// each completed job so the store can never grow unbounded between jobs.
pub struct RetentionSweeper {
    store: Arc<dyn JobStore>,
    artifacts: Arc<dyn ArtifactStore>,
    policy: RetentionPolicy,
}

impl RetentionSweeper {
    pub fn new(
        store: Arc<dyn JobStore>,
        artifacts: Arc<dyn ArtifactStore>,
        policy: RetentionPolicy,
    ) -> Self {
        Self {
            store,
            artifacts,
            policy,
        }
    }

    /// Evicts oldest terminal jobs past the capacity threshold and deletes
    /// their on-disk artifacts. Pending and running jobs are never touched;
    /// artifact deletion failures are logged, not propagated.
    pub async fn sweep(&self) {
        let size = match self.store.size().await {
            Ok(size) => size,
            Err(e) => {
                tracing::error!(error = %e, "Retention sweep failed to read store size");
                return;
            }
        };
        if size <= self.policy.capacity {
            return;
        }

        let evicted = match self.store.evict_terminal_down_to(self.policy.floor).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::error!(error = %e, "Retention sweep failed to evict jobs");
                return;
            }
        };

        tracing::info!(
            evicted = evicted.len(),
            size,
            floor = self.policy.floor,
            "Retention sweep evicted terminal jobs"
        );

        for job in evicted {
            if let Err(e) = self.artifacts.delete_job(job.id).await {
                tracing::warn!(
                    error = %e,
                    job_id = %job.id,
                    "Failed to delete artifacts for evicted job"
                );
            }
        }
    }
}
