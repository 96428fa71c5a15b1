use std::sync::Arc;

use crate::application::ports::ArtifactStore;
use crate::application::services::{AdmissionService, StatusService};

#[derive(Clone)]
pub struct AppState {
    pub admission: Arc<AdmissionService>,
    pub status: Arc<StatusService>,
    pub artifacts: Arc<dyn ArtifactStore>,
}
