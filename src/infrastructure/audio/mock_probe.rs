use async_trait::async_trait;

use crate::application::ports::{AudioProbe, ProbeError};
use crate::domain::TrackFacts;

/// Fixed-response probe for tests.
pub struct MockAudioProbe {
    facts: Option<TrackFacts>,
}

impl MockAudioProbe {
    pub fn reporting(duration_secs: f64) -> Self {
        Self {
            facts: Some(TrackFacts {
                duration_secs,
                sample_rate: 44_100,
                channels: 2,
            }),
        }
    }

    pub fn failing() -> Self {
        Self { facts: None }
    }
}

#[async_trait]
impl AudioProbe for MockAudioProbe {
    async fn probe(&self, _data: &[u8]) -> Result<TrackFacts, ProbeError> {
        self.facts.ok_or(ProbeError::UnknownDuration)
    }
}
