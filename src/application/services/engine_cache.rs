use std::sync::Arc;

use crate::application::ports::{EngineBuilder, EngineError, SeparationEngine};
use crate::domain::StemProfile;

struct CachedEngine {
    profile: StemProfile,
    engine: Box<dyn SeparationEngine>,
}

/// Holds at most one constructed engine, tagged by the profile it was built
/// for. Only the worker loop touches the cache, so no internal locking is
/// needed.
pub struct EngineCache {
    builder: Arc<dyn EngineBuilder>,
    cached: Option<CachedEngine>,
}

impl EngineCache {
    pub fn new(builder: Arc<dyn EngineBuilder>) -> Self {
        Self {
            builder,
            cached: None,
        }
    }

    /// Returns an engine for `profile`, reusing the cached instance when the
    /// profile matches. On a profile change the previous instance is dropped
    /// before the new one is constructed so two engines are never resident
    /// at once. A failed construction leaves the cache empty.
    pub async fn acquire(
        &mut self,
        profile: StemProfile,
    ) -> Result<&dyn SeparationEngine, EngineError> {
        match self.cached.take() {
            Some(cached) if cached.profile == profile => {
                tracing::debug!(profile = %profile, "Reusing cached separation engine");
                Ok(&*self.cached.insert(cached).engine)
            }
            previous => {
                if let Some(old) = previous {
                    tracing::info!(
                        old_profile = %old.profile,
                        new_profile = %profile,
                        "Releasing cached engine before rebuild"
                    );
                    drop(old);
                }
                tracing::info!(profile = %profile, "Constructing separation engine");
                let engine = self.builder.build(profile).await?;
                Ok(&*self.cached.insert(CachedEngine { profile, engine }).engine)
            }
        }
    }

    /// Profile of the currently cached instance, if any.
    pub fn cached_profile(&self) -> Option<StemProfile> {
        self.cached.as_ref().map(|c| c.profile)
    }
}
