mod artifact_store;
mod audio_probe;
mod job_store;
mod separation_engine;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use audio_probe::{AudioProbe, ProbeError};
pub use job_store::{JobMutation, JobStore, JobStoreError, PendingVisitor, StateCounts};
pub use separation_engine::{EngineBuilder, EngineError, SeparationEngine};
