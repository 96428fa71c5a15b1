use std::sync::Arc;

use demixer::application::ports::{ArtifactStore, JobStore};
use demixer::application::services::{RetentionPolicy, RetentionSweeper};
use demixer::domain::{Job, JobId, StemProfile};
use demixer::infrastructure::persistence::InMemoryJobStore;
use demixer::infrastructure::storage::LocalArtifactStore;

async fn insert_completed(
    store: &Arc<dyn JobStore>,
    artifacts: &Arc<dyn ArtifactStore>,
) -> JobId {
    let mut job = Job::new(StemProfile::TwoStems);
    let path = artifacts
        .store_input(job.id, "track.mp3", b"audio")
        .await
        .unwrap();
    job.input_path = Some(path);
    let stored = store.insert(job).await.unwrap();
    store
        .update(stored.id, Box::new(|j| j.complete(vec![])))
        .await
        .unwrap();
    stored.id
}

#[tokio::test]
async fn given_store_over_capacity_when_sweeping_then_trimmed_to_floor_with_artifacts_removed() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let artifacts: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(dir.path().to_path_buf()).unwrap());
    let sweeper = RetentionSweeper::new(
        Arc::clone(&store),
        Arc::clone(&artifacts),
        RetentionPolicy {
            capacity: 100,
            floor: 50,
        },
    );

    let mut ids = Vec::new();
    for _ in 0..101 {
        ids.push(insert_completed(&store, &artifacts).await);
    }
    assert_eq!(store.size().await.unwrap(), 101);

    sweeper.sweep().await;

    assert_eq!(store.size().await.unwrap(), 50);
    // Oldest terminal jobs go first, newest survive.
    assert!(store.get(ids[0]).await.unwrap().is_none());
    assert!(store.get(ids[50]).await.unwrap().is_none());
    assert!(store.get(ids[51]).await.unwrap().is_some());
    assert!(store.get(ids[100]).await.unwrap().is_some());

    assert!(!dir.path().join(ids[0].to_string()).exists());
    assert!(dir.path().join(ids[100].to_string()).exists());
}

#[tokio::test]
async fn given_store_under_capacity_when_sweeping_then_nothing_happens() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let artifacts: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(dir.path().to_path_buf()).unwrap());
    let sweeper = RetentionSweeper::new(
        Arc::clone(&store),
        Arc::clone(&artifacts),
        RetentionPolicy {
            capacity: 100,
            floor: 50,
        },
    );

    for _ in 0..10 {
        insert_completed(&store, &artifacts).await;
    }

    sweeper.sweep().await;

    assert_eq!(store.size().await.unwrap(), 10);
}

#[tokio::test]
async fn given_live_jobs_over_capacity_when_sweeping_then_they_are_never_evicted() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let artifacts: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(dir.path().to_path_buf()).unwrap());
    let sweeper = RetentionSweeper::new(
        Arc::clone(&store),
        Arc::clone(&artifacts),
        RetentionPolicy {
            capacity: 5,
            floor: 2,
        },
    );

    for _ in 0..8 {
        store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    }

    sweeper.sweep().await;

    assert_eq!(store.size().await.unwrap(), 8);
    assert_eq!(store.count_by_state().await.unwrap().pending, 8);
}
