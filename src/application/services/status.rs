use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{JobStore, JobStoreError, StateCounts};
use crate::domain::{Job, JobId, JobState};

/// Client-facing projection of one job.
#[derive(Debug, Serialize)]
pub struct StatusView {
    pub id: String,
    pub status: String,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct QueueStats {
    pub pending_count: usize,
    pub running_count: usize,
    pub complete_count: usize,
}

/// Read-only projections of the job store. No side effects.
pub struct StatusService {
    store: Arc<dyn JobStore>,
}

impl StatusService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub async fn status(&self, id: JobId) -> Result<Option<StatusView>, JobStoreError> {
        Ok(self.store.get(id).await?.map(project))
    }

    pub async fn queue_stats(&self) -> Result<QueueStats, JobStoreError> {
        let counts = self.store.count_by_state().await?;
        Ok(QueueStats {
            pending_count: counts.pending,
            running_count: counts.running,
            complete_count: counts.complete,
        })
    }

    pub async fn counts(&self) -> Result<StateCounts, JobStoreError> {
        self.store.count_by_state().await
    }
}

fn project(job: Job) -> StatusView {
    let (queue_position, message) = match job.state {
        JobState::Pending => (
            Some(job.queue_position),
            Some(format!(
                "Waiting in queue at position {}",
                job.queue_position
            )),
        ),
        JobState::Running => (None, Some("Separation in progress".to_string())),
        JobState::Complete | JobState::Failed => (None, None),
    };

    StatusView {
        id: job.id.to_string(),
        status: job.state.as_str().to_string(),
        progress: job.progress,
        queue_position,
        message,
        outputs: job.outputs,
        error: job.error_detail,
        created_at: job.created_at.to_rfc3339(),
    }
}
