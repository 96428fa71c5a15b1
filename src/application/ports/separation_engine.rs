use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::StemProfile;

/// A constructed separation engine, bound to the profile it was built for.
/// Instances hold large model buffers; at most one should be alive at a
/// time.
#[async_trait]
pub trait SeparationEngine: Send + Sync {
    /// Separates `input` into stems under `output_dir`, returning the
    /// produced artifact paths.
    async fn separate(&self, input: &Path, output_dir: &Path)
    -> Result<Vec<PathBuf>, EngineError>;
}

/// Constructs engines on demand. Construction loads model weights and takes
/// seconds; callers cache the result per profile.
#[async_trait]
pub trait EngineBuilder: Send + Sync {
    async fn build(&self, profile: StemProfile) -> Result<Box<dyn SeparationEngine>, EngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine construction failed: {0}")]
    ConstructionFailed(String),
    #[error("separation failed: {0}")]
    SeparationFailed(String),
}
