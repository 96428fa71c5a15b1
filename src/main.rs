use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use demixer::application::ports::{ArtifactStore, AudioProbe, EngineBuilder, JobStore};
use demixer::application::services::{
    AdmissionService, RetentionPolicy, RetentionSweeper, SeparationWorker, StatusService,
};
use demixer::infrastructure::audio::SymphoniaProbe;
use demixer::infrastructure::engine::{ProcessEngineBuilder, ProcessEngineConfig};
use demixer::infrastructure::observability::{TracingConfig, init_tracing};
use demixer::infrastructure::persistence::InMemoryJobStore;
use demixer::infrastructure::storage::LocalArtifactStore;
use demixer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(
        TracingConfig::new(Environment::from_env(), settings.logging.json_format),
        settings.server.port,
    );

    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let artifacts: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(settings.storage.artifact_root.clone())?);
    let probe: Arc<dyn AudioProbe> = Arc::new(SymphoniaProbe);
    let engines: Arc<dyn EngineBuilder> = Arc::new(ProcessEngineBuilder::new(ProcessEngineConfig {
        binary: settings.engine.binary.clone(),
        model_dir: settings.engine.model_dir.clone(),
    }));

    let sweeper = RetentionSweeper::new(
        Arc::clone(&store),
        Arc::clone(&artifacts),
        RetentionPolicy {
            capacity: settings.retention.capacity,
            floor: settings.retention.floor,
        },
    );

    let worker = Arc::new(SeparationWorker::new(
        Arc::clone(&store),
        Arc::clone(&artifacts),
        engines,
        sweeper,
    ));

    let admission = Arc::new(AdmissionService::new(
        Arc::clone(&store),
        Arc::clone(&artifacts),
        probe,
        Arc::clone(&worker),
        settings.limits.max_duration_secs,
    ));

    let status = Arc::new(StatusService::new(Arc::clone(&store)));

    let state = AppState {
        admission,
        status,
        artifacts,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
