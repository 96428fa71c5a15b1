use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{EngineBuilder, EngineError, SeparationEngine};
use crate::domain::StemProfile;

/// Test double that writes placeholder stem files. Constructions are
/// counted so cache reuse is observable from tests.
pub struct MockEngineBuilder {
    constructed: AtomicUsize,
    fail_construction: bool,
    fail_separation: bool,
    separation_delay: Option<Duration>,
}

impl MockEngineBuilder {
    pub fn new() -> Self {
        Self {
            constructed: AtomicUsize::new(0),
            fail_construction: false,
            fail_separation: false,
            separation_delay: None,
        }
    }

    pub fn failing_construction() -> Self {
        Self {
            fail_construction: true,
            ..Self::new()
        }
    }

    pub fn failing_separation() -> Self {
        Self {
            fail_separation: true,
            ..Self::new()
        }
    }

    pub fn with_separation_delay(delay: Duration) -> Self {
        Self {
            separation_delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn constructed_count(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }
}

impl Default for MockEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineBuilder for MockEngineBuilder {
    async fn build(&self, profile: StemProfile) -> Result<Box<dyn SeparationEngine>, EngineError> {
        if self.fail_construction {
            return Err(EngineError::ConstructionFailed(
                "mock model unavailable".to_string(),
            ));
        }
        self.constructed.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSeparationEngine {
            profile,
            fail_separation: self.fail_separation,
            separation_delay: self.separation_delay,
        }))
    }
}

pub struct MockSeparationEngine {
    profile: StemProfile,
    fail_separation: bool,
    separation_delay: Option<Duration>,
}

#[async_trait]
impl SeparationEngine for MockSeparationEngine {
    async fn separate(
        &self,
        _input: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, EngineError> {
        if let Some(delay) = self.separation_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_separation {
            return Err(EngineError::SeparationFailed(
                "mock separation blew up".to_string(),
            ));
        }

        let mut produced = Vec::new();
        for name in self.profile.stem_names() {
            let path = output_dir.join(name);
            tokio::fs::write(&path, b"RIFF")
                .await
                .map_err(|e| EngineError::SeparationFailed(format!("write stem: {}", e)))?;
            produced.push(path);
        }
        Ok(produced)
    }
}
