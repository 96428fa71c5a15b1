use std::sync::Arc;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, AudioProbe, JobStore, JobStoreError,
};
use crate::application::services::SeparationWorker;
use crate::domain::{Job, StemProfile};

/// Validates and enqueues separation requests.
pub struct AdmissionService {
    store: Arc<dyn JobStore>,
    artifacts: Arc<dyn ArtifactStore>,
    probe: Arc<dyn AudioProbe>,
    worker: Arc<SeparationWorker>,
    max_duration_secs: f64,
}

impl AdmissionService {
    pub fn new(
        store: Arc<dyn JobStore>,
        artifacts: Arc<dyn ArtifactStore>,
        probe: Arc<dyn AudioProbe>,
        worker: Arc<SeparationWorker>,
        max_duration_secs: f64,
    ) -> Self {
        Self {
            store,
            artifacts,
            probe,
            worker,
            max_duration_secs,
        }
    }

    /// Admits an upload: normalizes the profile, applies the duration
    /// ceiling, persists the input into the job's directory, and inserts a
    /// pending job. The worker is triggered after the insert so the new job
    /// is always visible to the loop's next scan.
    pub async fn submit(
        &self,
        data: &[u8],
        filename: &str,
        raw_profile: &str,
    ) -> Result<Job, AdmissionError> {
        if data.is_empty() {
            return Err(AdmissionError::EmptyUpload);
        }

        let profile = StemProfile::from_param(raw_profile);

        match self.probe.probe(data).await {
            Ok(facts) if facts.duration_secs > self.max_duration_secs => {
                return Err(AdmissionError::DurationExceeded {
                    measured_secs: facts.duration_secs,
                    limit_secs: self.max_duration_secs,
                });
            }
            Ok(facts) => {
                tracing::debug!(
                    duration_secs = facts.duration_secs,
                    sample_rate = facts.sample_rate,
                    "Upload probed"
                );
            }
            Err(e) => {
                // The ceiling is best-effort: an unreadable header should not
                // block the user.
                tracing::warn!(
                    error = %e,
                    filename = %filename,
                    "Duration probe failed, admitting without ceiling check"
                );
            }
        }

        let mut job = Job::new(profile);
        let input_path = self.artifacts.store_input(job.id, filename, data).await?;
        job.input_path = Some(input_path);

        let stored = self.store.insert(job).await?;

        tracing::info!(
            job_id = %stored.id,
            profile = %stored.profile,
            queue_position = stored.queue_position,
            "Separation job enqueued"
        );

        Arc::clone(&self.worker).ensure_running();

        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("no audio data supplied")]
    EmptyUpload,
    #[error("audio duration {measured_secs:.1}s exceeds the {limit_secs:.0}s limit")]
    DurationExceeded { measured_secs: f64, limit_secs: f64 },
    #[error("artifact store: {0}")]
    Artifacts(#[from] ArtifactStoreError),
    #[error("job store: {0}")]
    Store(#[from] JobStoreError),
}
