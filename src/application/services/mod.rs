mod admission;
mod engine_cache;
mod retention;
mod status;
mod worker;

pub use admission::{AdmissionError, AdmissionService};
pub use engine_cache::EngineCache;
pub use retention::{RetentionPolicy, RetentionSweeper};
pub use status::{QueueStats, StatusService, StatusView};
pub use worker::SeparationWorker;
