use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{EngineBuilder, EngineError, SeparationEngine};
use crate::domain::StemProfile;

/// Location of the external separator binary and its model weights.
#[derive(Debug, Clone)]
pub struct ProcessEngineConfig {
    pub binary: PathBuf,
    pub model_dir: PathBuf,
}

/// Builds engines backed by an external separator process. Construction
/// verifies the model weights for the requested profile exist so a missing
/// artifact surfaces at build time, not mid-job.
pub struct ProcessEngineBuilder {
    config: ProcessEngineConfig,
}

impl ProcessEngineBuilder {
    pub fn new(config: ProcessEngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EngineBuilder for ProcessEngineBuilder {
    async fn build(&self, profile: StemProfile) -> Result<Box<dyn SeparationEngine>, EngineError> {
        let model_path = self.config.model_dir.join(profile.as_str());
        match tokio::fs::try_exists(&model_path).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(EngineError::ConstructionFailed(format!(
                    "model weights not found: {}",
                    model_path.display()
                )));
            }
            Err(e) => {
                return Err(EngineError::ConstructionFailed(format!(
                    "model check {}: {}",
                    model_path.display(),
                    e
                )));
            }
        }

        Ok(Box::new(ProcessSeparationEngine {
            binary: self.config.binary.clone(),
            model_path,
            profile,
        }))
    }
}

/// One engine invocation runs the separator binary to completion against the
/// verified model directory and collects whatever files it produced.
pub struct ProcessSeparationEngine {
    binary: PathBuf,
    model_path: PathBuf,
    profile: StemProfile,
}

#[async_trait]
impl SeparationEngine for ProcessSeparationEngine {
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, EngineError> {
        let output = Command::new(&self.binary)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--stems")
            .arg(self.profile.stem_count().to_string())
            .arg("--out")
            .arg(output_dir)
            .arg(input)
            .output()
            .await
            .map_err(|e| {
                EngineError::SeparationFailed(format!("spawn {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::SeparationFailed(format!(
                "separator exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let mut produced = Vec::new();
        let mut entries = tokio::fs::read_dir(output_dir)
            .await
            .map_err(|e| EngineError::SeparationFailed(format!("read outputs: {}", e)))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| EngineError::SeparationFailed(format!("read outputs: {}", e)))?
        {
            if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                produced.push(entry.path());
            }
        }
        produced.sort();

        if produced.is_empty() {
            return Err(EngineError::SeparationFailed(
                "separator produced no stems".to_string(),
            ));
        }

        Ok(produced)
    }
}
