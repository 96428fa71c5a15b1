use std::sync::Arc;

use demixer::application::ports::JobStore;
use demixer::domain::{Job, JobState, StemProfile};
use demixer::infrastructure::persistence::InMemoryJobStore;

fn store() -> Arc<dyn JobStore> {
    Arc::new(InMemoryJobStore::new())
}

#[tokio::test]
async fn given_n_submissions_when_inserted_then_positions_are_dense_fifo() {
    let store = store();
    for expected in 0..5 {
        let stored = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
        assert_eq!(stored.queue_position, expected);
    }
}

#[tokio::test]
async fn given_terminal_jobs_when_inserting_then_position_counts_only_live_jobs() {
    let store = store();
    let a = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    let b = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    store
        .update(a.id, Box::new(|j| j.complete(vec![])))
        .await
        .unwrap();
    store
        .update(b.id, Box::new(|j| j.fail("boom")))
        .await
        .unwrap();

    let c = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    assert_eq!(c.queue_position, 0);
}

#[tokio::test]
async fn given_mixed_states_when_scanning_then_next_pending_is_oldest() {
    let store = store();
    let a = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    let b = store.insert(Job::new(StemProfile::FourStems)).await.unwrap();

    store.update(a.id, Box::new(|j| j.start())).await.unwrap();

    let next = store.next_pending().await.unwrap().unwrap();
    assert_eq!(next.id, b.id);
}

#[tokio::test]
async fn given_empty_pending_set_when_scanning_then_next_pending_is_none() {
    let store = store();
    let a = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    store
        .update(a.id, Box::new(|j| j.complete(vec![])))
        .await
        .unwrap();

    assert!(store.next_pending().await.unwrap().is_none());
}

#[tokio::test]
async fn given_unknown_id_when_updating_then_returns_none() {
    let store = store();
    let phantom = Job::new(StemProfile::TwoStems);
    let updated = store
        .update(phantom.id, Box::new(|j| j.start()))
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn given_completed_head_when_recomputing_then_positions_shift_down() {
    let store = store();
    let a = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    let b = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    let c = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();

    store
        .update(a.id, Box::new(|j| j.complete(vec![])))
        .await
        .unwrap();
    store
        .for_each_pending(Box::new(|position, j| j.queue_position = position))
        .await
        .unwrap();

    assert_eq!(store.get(b.id).await.unwrap().unwrap().queue_position, 0);
    assert_eq!(store.get(c.id).await.unwrap().unwrap().queue_position, 1);
}

#[tokio::test]
async fn given_mixed_states_when_counting_then_counts_match() {
    let store = store();
    let a = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    let b = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    let c = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();

    store.update(a.id, Box::new(|j| j.start())).await.unwrap();
    store
        .update(b.id, Box::new(|j| j.complete(vec![])))
        .await
        .unwrap();
    store
        .update(c.id, Box::new(|j| j.fail("boom")))
        .await
        .unwrap();

    let counts = store.count_by_state().await.unwrap();
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.running, 1);
    assert_eq!(counts.complete, 1);
    assert_eq!(counts.failed, 1);
    assert_eq!(store.size().await.unwrap(), 4);
}

#[tokio::test]
async fn given_eviction_when_floor_reached_then_oldest_terminal_jobs_go_first() {
    let store = store();
    let mut terminal_ids = Vec::new();
    for _ in 0..4 {
        let job = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
        store
            .update(job.id, Box::new(|j| j.complete(vec![])))
            .await
            .unwrap();
        terminal_ids.push(job.id);
    }
    let pending = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();

    let evicted = store.evict_terminal_down_to(2).await.unwrap();

    assert_eq!(evicted.len(), 3);
    assert_eq!(evicted[0].id, terminal_ids[0]);
    assert_eq!(evicted[1].id, terminal_ids[1]);
    assert_eq!(evicted[2].id, terminal_ids[2]);
    assert_eq!(store.size().await.unwrap(), 2);
    assert!(store.get(pending.id).await.unwrap().is_some());
}

#[tokio::test]
async fn given_only_live_jobs_when_evicting_then_nothing_is_removed() {
    let store = store();
    for _ in 0..3 {
        store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    }

    let evicted = store.evict_terminal_down_to(1).await.unwrap();

    assert!(evicted.is_empty());
    assert_eq!(store.size().await.unwrap(), 3);
    assert_eq!(store.count_by_state().await.unwrap().pending, 3);
}

#[tokio::test]
async fn given_terminal_job_when_updated_then_snapshot_stays_terminal() {
    let store = store();
    let a = store.insert(Job::new(StemProfile::TwoStems)).await.unwrap();
    store
        .update(a.id, Box::new(|j| j.fail("boom")))
        .await
        .unwrap();

    let after = store
        .update(a.id, Box::new(|j| j.complete(vec!["vocals.wav".to_string()])))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(after.state, JobState::Failed);
    assert!(after.outputs.is_empty());
}
