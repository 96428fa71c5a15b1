use std::sync::Arc;

use demixer::application::ports::EngineBuilder;
use demixer::application::services::EngineCache;
use demixer::domain::StemProfile;
use demixer::infrastructure::engine::MockEngineBuilder;

#[tokio::test]
async fn given_same_profile_twice_when_acquiring_then_engine_is_constructed_once() {
    let builder = Arc::new(MockEngineBuilder::new());
    let engines: Arc<dyn EngineBuilder> = builder.clone();
    let mut cache = EngineCache::new(engines);

    cache.acquire(StemProfile::TwoStems).await.unwrap();
    cache.acquire(StemProfile::TwoStems).await.unwrap();

    assert_eq!(builder.constructed_count(), 1);
    assert_eq!(cache.cached_profile(), Some(StemProfile::TwoStems));
}

#[tokio::test]
async fn given_profile_change_when_acquiring_then_exactly_one_rebuild_happens() {
    let builder = Arc::new(MockEngineBuilder::new());
    let engines: Arc<dyn EngineBuilder> = builder.clone();
    let mut cache = EngineCache::new(engines);

    cache.acquire(StemProfile::TwoStems).await.unwrap();
    cache.acquire(StemProfile::FourStems).await.unwrap();
    cache.acquire(StemProfile::FourStems).await.unwrap();

    assert_eq!(builder.constructed_count(), 2);
    assert_eq!(cache.cached_profile(), Some(StemProfile::FourStems));
}

#[tokio::test]
async fn given_failing_builder_when_acquiring_then_cache_is_left_empty() {
    let engines: Arc<dyn EngineBuilder> = Arc::new(MockEngineBuilder::failing_construction());
    let mut cache = EngineCache::new(engines);

    let result = cache.acquire(StemProfile::TwoStems).await;

    assert!(result.is_err());
    assert_eq!(cache.cached_profile(), None);
}
