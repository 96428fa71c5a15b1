use async_trait::async_trait;

use crate::domain::TrackFacts;

/// Inspects raw audio and reports technical facts about it. Admission uses
/// the measured duration for its ceiling check; probe failures are advisory
/// there, never fatal.
#[async_trait]
pub trait AudioProbe: Send + Sync {
    async fn probe(&self, data: &[u8]) -> Result<TrackFacts, ProbeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("unrecognized audio container: {0}")]
    UnrecognizedFormat(String),
    #[error("demux failed: {0}")]
    DemuxFailed(String),
    #[error("no audio track found")]
    NoAudioTrack,
    #[error("duration could not be determined")]
    UnknownDuration,
}
