use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::JobId;

/// Owns the on-disk layout of job artifacts: one directory per job holding
/// the uploaded input and an `outputs/` subdirectory the engine writes
/// into.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persists an uploaded input under the job's directory and returns its
    /// path.
    async fn store_input(
        &self,
        job_id: JobId,
        filename: &str,
        data: &[u8],
    ) -> Result<PathBuf, ArtifactStoreError>;

    /// Creates (if needed) and returns the job's output directory.
    async fn output_dir(&self, job_id: JobId) -> Result<PathBuf, ArtifactStoreError>;

    /// Reads one named output artifact.
    async fn read_output(&self, job_id: JobId, name: &str) -> Result<Vec<u8>, ArtifactStoreError>;

    /// Deletes a consumed input artifact.
    async fn delete_input(&self, path: &Path) -> Result<(), ArtifactStoreError>;

    /// Deletes the job's entire directory tree.
    async fn delete_job(&self, job_id: JobId) -> Result<(), ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("invalid artifact name: {0}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
