use async_trait::async_trait;

use crate::domain::{Job, JobId};

/// Atomic single-record mutation applied under the store lock.
pub type JobMutation = Box<dyn FnOnce(&mut Job) + Send>;

/// Visitor over the pending set, called with each job's dense FIFO index.
pub type PendingVisitor = Box<dyn FnMut(usize, &mut Job) + Send>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub pending: usize,
    pub running: usize,
    pub complete: usize,
    pub failed: usize,
}

/// Source of truth for job records. Implementations must keep submission
/// order and make every operation atomic with respect to concurrent access
/// from handlers, the worker, and the retention sweeper.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Inserts a pending job, assigning its queue position from the current
    /// count of non-terminal jobs, and returns the stored snapshot.
    async fn insert(&self, job: Job) -> Result<Job, JobStoreError>;

    async fn get(&self, id: JobId) -> Result<Option<Job>, JobStoreError>;

    /// Applies `mutate` to one record as an atomic read-modify-write and
    /// returns the updated snapshot, or `None` for an unknown id.
    async fn update(&self, id: JobId, mutate: JobMutation) -> Result<Option<Job>, JobStoreError>;

    /// Oldest pending job in submission order, if any.
    async fn next_pending(&self) -> Result<Option<Job>, JobStoreError>;

    /// Visits every pending job in submission order under a single lock
    /// acquisition; used to recompute dense queue positions.
    async fn for_each_pending(&self, visit: PendingVisitor) -> Result<(), JobStoreError>;

    async fn count_by_state(&self) -> Result<StateCounts, JobStoreError>;

    /// Total number of stored records, terminal included.
    async fn size(&self) -> Result<usize, JobStoreError>;

    /// Removes oldest terminal jobs until at most `floor` records remain and
    /// returns the evicted jobs. Pending and running jobs are never removed.
    async fn evict_terminal_down_to(&self, floor: usize) -> Result<Vec<Job>, JobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("store operation failed: {0}")]
    OperationFailed(String),
}
