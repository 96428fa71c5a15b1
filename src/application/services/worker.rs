use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::Instrument;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, EngineBuilder, EngineError, JobStore, JobStoreError,
};
use crate::application::services::{EngineCache, RetentionSweeper};
use crate::domain::{Job, JobId, PROGRESS_ENGINE_READY};

/// The single background executor. Submissions start it lazily; it runs the
/// queue to exhaustion in FIFO order and exits. At most one loop instance is
/// active process-wide, which is what keeps one engine invocation (and one
/// engine instance) in flight at a time.
pub struct SeparationWorker {
    store: Arc<dyn JobStore>,
    artifacts: Arc<dyn ArtifactStore>,
    engine_cache: Mutex<EngineCache>,
    sweeper: RetentionSweeper,
    active: AtomicBool,
}

impl SeparationWorker {
    pub fn new(
        store: Arc<dyn JobStore>,
        artifacts: Arc<dyn ArtifactStore>,
        engines: Arc<dyn EngineBuilder>,
        sweeper: RetentionSweeper,
    ) -> Self {
        Self {
            store,
            artifacts,
            engine_cache: Mutex::new(EngineCache::new(engines)),
            sweeper,
            active: AtomicBool::new(false),
        }
    }

    /// Idempotent start trigger. Spawns the loop when none is active,
    /// otherwise does nothing; the compare-exchange guards against two
    /// submissions racing a loop into existence twice.
    pub fn ensure_running(self: Arc<Self>) {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        tokio::spawn(async move {
            self.run_loop().await;
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    async fn run_loop(self: Arc<Self>) {
        tracing::info!("Separation worker started");
        loop {
            let job = match self.claim_next().await {
                Ok(Some(job)) => job,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to scan queue");
                    break;
                }
            };

            let span = tracing::info_span!(
                "separation_job",
                job_id = %job.id,
                profile = %job.profile,
            );
            self.process_job(job).instrument(span).await;

            self.sweeper.sweep().await;
        }
        self.active.store(false, Ordering::Release);
        tracing::info!("Separation worker stopped: queue drained");

        // A submission may have landed between the final scan and the flag
        // reset; restart rather than leaving it stranded.
        match self.store.next_pending().await {
            Ok(Some(_)) => Arc::clone(&self).ensure_running(),
            Ok(None) => {}
            Err(e) => tracing::error!(error = %e, "Failed to re-check queue after drain"),
        }
    }

    /// Oldest pending job, transitioned to Running under the store lock.
    async fn claim_next(&self) -> Result<Option<Job>, JobStoreError> {
        match self.store.next_pending().await? {
            Some(next) => self.store.update(next.id, Box::new(|job| job.start())).await,
            None => Ok(None),
        }
    }

    async fn process_job(&self, job: Job) {
        let job_id = job.id;
        let result = self.run_separation(&job).await;

        let recorded = match result {
            Ok(outputs) => {
                tracing::info!(stems = outputs.len(), "Separation complete");
                self.store
                    .update(job_id, Box::new(move |j| j.complete(outputs)))
                    .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Separation job failed");
                let detail = e.to_string();
                self.store
                    .update(job_id, Box::new(move |j| j.fail(detail)))
                    .await
            }
        };
        if let Err(e) = recorded {
            tracing::error!(error = %e, "Failed to record job outcome");
        }

        self.reclaim_input(job_id).await;

        if let Err(e) = self
            .store
            .for_each_pending(Box::new(|position, j| j.queue_position = position))
            .await
        {
            tracing::error!(error = %e, "Failed to recompute queue positions");
        }
    }

    async fn run_separation(&self, job: &Job) -> Result<Vec<String>, SeparationJobError> {
        let input = job
            .input_path
            .clone()
            .ok_or(SeparationJobError::MissingInput)?;

        let mut cache = self.engine_cache.lock().await;
        let engine = cache
            .acquire(job.profile)
            .await
            .map_err(SeparationJobError::Engine)?;

        self.checkpoint(job.id, PROGRESS_ENGINE_READY).await;

        let output_dir = self
            .artifacts
            .output_dir(job.id)
            .await
            .map_err(SeparationJobError::Artifacts)?;

        let produced = engine
            .separate(&input, &output_dir)
            .await
            .map_err(SeparationJobError::Engine)?;

        Ok(produced
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect())
    }

    async fn checkpoint(&self, job_id: JobId, progress: u8) {
        if let Err(e) = self
            .store
            .update(job_id, Box::new(move |j| j.checkpoint(progress)))
            .await
        {
            tracing::warn!(error = %e, "Failed to record progress checkpoint");
        }
    }

    /// Deletes the consumed input artifact once the job is terminal. The
    /// reference is cleared before the delete so reclamation happens at most
    /// once; a failed delete is logged, never fatal.
    async fn reclaim_input(&self, job_id: JobId) {
        let input = match self.store.get(job_id).await {
            Ok(Some(job)) => job.input_path,
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load job for input reclamation");
                None
            }
        };
        let Some(path) = input else {
            return;
        };

        if let Err(e) = self
            .store
            .update(job_id, Box::new(|j| j.input_path = None))
            .await
        {
            tracing::error!(error = %e, "Failed to clear input reference");
        }

        if let Err(e) = self.artifacts.delete_input(&path).await {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to delete input artifact after job finished"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum SeparationJobError {
    #[error("input artifact missing")]
    MissingInput,
    #[error("{0}")]
    Engine(EngineError),
    #[error("artifact store: {0}")]
    Artifacts(ArtifactStoreError),
}
