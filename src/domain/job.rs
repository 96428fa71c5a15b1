use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{JobState, StemProfile};

/// Progress checkpoint once the worker claims a job.
pub const PROGRESS_CLAIMED: u8 = 5;
/// Progress checkpoint once an engine instance is ready.
pub const PROGRESS_ENGINE_READY: u8 = 40;
/// Progress value for completed jobs.
pub const PROGRESS_DONE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A queued unit of separation work. State moves Pending -> Running ->
/// Complete | Failed; the transition helpers refuse to mutate a terminal
/// job so a finished record can never change under a polling client.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub state: JobState,
    pub profile: StemProfile,
    pub progress: u8,
    pub queue_position: usize,
    pub created_at: DateTime<Utc>,
    pub input_path: Option<PathBuf>,
    pub outputs: Vec<String>,
    pub error_detail: Option<String>,
}

impl Job {
    pub fn new(profile: StemProfile) -> Self {
        Self {
            id: JobId::new(),
            state: JobState::Pending,
            profile,
            progress: 0,
            queue_position: 0,
            created_at: Utc::now(),
            input_path: None,
            outputs: Vec::new(),
            error_detail: None,
        }
    }

    pub fn start(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.state = JobState::Running;
        self.progress = PROGRESS_CLAIMED;
        self.queue_position = 0;
    }

    /// Raises progress to `value`. Progress never moves backward.
    pub fn checkpoint(&mut self, value: u8) {
        if self.state.is_terminal() {
            return;
        }
        self.progress = self.progress.max(value.min(PROGRESS_DONE));
    }

    pub fn complete(&mut self, outputs: Vec<String>) {
        if self.state.is_terminal() {
            return;
        }
        self.state = JobState::Complete;
        self.progress = PROGRESS_DONE;
        self.outputs = outputs;
    }

    pub fn fail(&mut self, detail: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        self.state = JobState::Failed;
        self.error_detail = Some(detail.into());
    }
}
