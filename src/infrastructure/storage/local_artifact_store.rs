use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::JobId;

const OUTPUT_SUBDIR: &str = "outputs";

/// Filesystem layout: `<root>/<job_id>/input.<ext>` holds the upload and
/// `<root>/<job_id>/outputs/` is populated by the engine. Evicting a job
/// removes the whole `<root>/<job_id>` tree.
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&root).map_err(ArtifactStoreError::Io)?;
        Ok(Self { root })
    }

    fn job_dir(&self, job_id: JobId) -> PathBuf {
        self.root.join(job_id.to_string())
    }
}

/// Output names arrive straight from URLs; anything that could walk out of
/// the job directory is rejected.
fn checked_name(name: &str) -> Result<&str, ArtifactStoreError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ArtifactStoreError::InvalidName(name.to_string()));
    }
    Ok(name)
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store_input(
        &self,
        job_id: JobId,
        filename: &str,
        data: &[u8],
    ) -> Result<PathBuf, ArtifactStoreError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let dir = self.job_dir(job_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(format!("create {}: {}", dir.display(), e)))?;

        let path = dir.join(format!("input.{}", extension));
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(format!("write {}: {}", path.display(), e)))?;
        Ok(path)
    }

    async fn output_dir(&self, job_id: JobId) -> Result<PathBuf, ArtifactStoreError> {
        let dir = self.job_dir(job_id).join(OUTPUT_SUBDIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(format!("create {}: {}", dir.display(), e)))?;
        Ok(dir)
    }

    async fn read_output(&self, job_id: JobId, name: &str) -> Result<Vec<u8>, ArtifactStoreError> {
        let name = checked_name(name)?;
        let path = self.job_dir(job_id).join(OUTPUT_SUBDIR).join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ArtifactStoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_input(&self, path: &Path) -> Result<(), ArtifactStoreError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| ArtifactStoreError::DeleteFailed(format!("{}: {}", path.display(), e)))
    }

    async fn delete_job(&self, job_id: JobId) -> Result<(), ArtifactStoreError> {
        let dir = self.job_dir(job_id);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ArtifactStoreError::DeleteFailed(format!(
                "{}: {}",
                dir.display(),
                e
            ))),
        }
    }
}
