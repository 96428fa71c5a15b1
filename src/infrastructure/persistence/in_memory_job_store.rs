use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{
    JobMutation, JobStore, JobStoreError, PendingVisitor, StateCounts,
};
use crate::domain::{Job, JobId, JobState};

/// Process-local job store. Records live in a single `Vec` in submission
/// order behind one mutex, so FIFO scans, position recomputation, and state
/// transitions are all atomic units. Queue state is lost on restart, which
/// is acceptable here: an interrupted separation cannot be resumed anyway.
pub struct InMemoryJobStore {
    jobs: Mutex<Vec<Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn insert(&self, mut job: Job) -> Result<Job, JobStoreError> {
        let mut jobs = self.jobs.lock().await;
        job.queue_position = jobs.iter().filter(|j| !j.state.is_terminal()).count();
        jobs.push(job.clone());
        Ok(job)
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        let jobs = self.jobs.lock().await;
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn update(&self, id: JobId, mutate: JobMutation) -> Result<Option<Job>, JobStoreError> {
        let mut jobs = self.jobs.lock().await;
        match jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                mutate(job);
                Ok(Some(job.clone()))
            }
            None => Ok(None),
        }
    }

    async fn next_pending(&self) -> Result<Option<Job>, JobStoreError> {
        let jobs = self.jobs.lock().await;
        Ok(jobs.iter().find(|j| j.state == JobState::Pending).cloned())
    }

    async fn for_each_pending(&self, mut visit: PendingVisitor) -> Result<(), JobStoreError> {
        let mut jobs = self.jobs.lock().await;
        for (position, job) in jobs
            .iter_mut()
            .filter(|j| j.state == JobState::Pending)
            .enumerate()
        {
            visit(position, job);
        }
        Ok(())
    }

    async fn count_by_state(&self) -> Result<StateCounts, JobStoreError> {
        let jobs = self.jobs.lock().await;
        let mut counts = StateCounts::default();
        for job in jobs.iter() {
            match job.state {
                JobState::Pending => counts.pending += 1,
                JobState::Running => counts.running += 1,
                JobState::Complete => counts.complete += 1,
                JobState::Failed => counts.failed += 1,
            }
        }
        Ok(counts)
    }

    async fn size(&self) -> Result<usize, JobStoreError> {
        Ok(self.jobs.lock().await.len())
    }

    async fn evict_terminal_down_to(&self, floor: usize) -> Result<Vec<Job>, JobStoreError> {
        let mut jobs = self.jobs.lock().await;
        let mut evicted = Vec::new();
        // Submission order doubles as created_at order, so the first
        // terminal entry is always the oldest one.
        while jobs.len() > floor {
            let Some(index) = jobs.iter().position(|j| j.state.is_terminal()) else {
                break;
            };
            evicted.push(jobs.remove(index));
        }
        Ok(evicted)
    }
}
