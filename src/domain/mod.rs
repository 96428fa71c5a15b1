mod job;
mod job_state;
mod stem_profile;
mod track_facts;

pub use job::{Job, JobId, PROGRESS_CLAIMED, PROGRESS_DONE, PROGRESS_ENGINE_READY};
pub use job_state::JobState;
pub use stem_profile::StemProfile;
pub use track_facts::TrackFacts;
