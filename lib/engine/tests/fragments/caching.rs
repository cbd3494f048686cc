use crate::{example_triples, seekable_store, CountingSource, FailingSource};
use ldf_engine::{
    CacheStatistics, CachingFragmentEngine, ConfigError, FragmentEngine, FragmentEngineConfig,
    FragmentError, FragmentRequest,
};
use std::sync::Arc;

fn typed_request(page: &str) -> FragmentRequest {
    FragmentRequest::from_parameters(
        None,
        Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
        None,
        Some(page),
        None,
        &config(),
    )
    .unwrap()
}

fn config() -> FragmentEngineConfig {
    FragmentEngineConfig::default()
        .with_page_size(2)
        .with_cache_capacity(8)
}

#[test]
fn repeated_request_is_answered_from_cache() {
    let source = Arc::new(CountingSource::new(seekable_store(&example_triples())));
    let engine = FragmentEngine::try_new(Arc::clone(&source), config()).unwrap();
    let engine = CachingFragmentEngine::new(engine);

    let first = engine.execute(&typed_request("1")).unwrap();
    let second = engine.execute(&typed_request("1")).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.searches().len(), 1);
    assert_eq!(
        engine.statistics(),
        CacheStatistics {
            requests: 2,
            hits: 1,
            entries: 1,
        }
    );
}

#[test]
fn different_pages_are_cached_separately() {
    let engine = FragmentEngine::try_new(Arc::new(seekable_store(&example_triples())), config())
        .unwrap();
    let engine = CachingFragmentEngine::new(engine);

    let first = engine.execute(&typed_request("1")).unwrap();
    let third = engine.execute(&typed_request("3")).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(third.len(), 1);
    assert_eq!(third.total_size(), 5);
    assert_eq!(engine.statistics().entries, 2);
    assert_eq!(engine.statistics().hits, 0);
}

#[test]
fn binding_tables_are_part_of_the_key() {
    let engine = FragmentEngine::try_new(Arc::new(seekable_store(&example_triples())), config())
        .unwrap();
    let engine = CachingFragmentEngine::new(engine);

    let request = |values: &str| {
        FragmentRequest::from_parameters(
            Some("?s"),
            None,
            None,
            None,
            Some(values),
            &config(),
        )
        .unwrap()
    };
    let r0 = engine
        .execute(&request("?s { <http://example.com/r0> }"))
        .unwrap();
    let r4 = engine
        .execute(&request("?s { <http://example.com/r4> }"))
        .unwrap();

    assert_eq!(r0.len(), 2);
    assert_eq!(r4.len(), 1);
    assert_eq!(engine.statistics().hits, 0);
}

#[test]
fn disabled_cache_never_hits() {
    let engine = FragmentEngine::try_new(
        Arc::new(seekable_store(&example_triples())),
        config().with_cache_capacity(0),
    )
    .unwrap();
    let engine = CachingFragmentEngine::new(engine);

    engine.execute(&typed_request("1")).unwrap();
    engine.execute(&typed_request("1")).unwrap();

    assert_eq!(
        engine.statistics(),
        CacheStatistics {
            requests: 2,
            hits: 0,
            entries: 0,
        }
    );
}

#[test]
fn errors_are_not_cached() {
    let source = FailingSource {
        inner: seekable_store(&example_triples()),
        fail_after: 0,
    };
    let engine = FragmentEngine::try_new(Arc::new(source), config()).unwrap();
    let engine = CachingFragmentEngine::new(engine);

    for _ in 0..2 {
        let result = engine.execute(&typed_request("1"));
        assert!(matches!(result, Err(FragmentError::Storage(_))));
    }
    assert_eq!(engine.statistics().entries, 0);
    assert_eq!(engine.statistics().hits, 0);
}

#[test]
fn clear_resets_cache_and_counters() {
    let engine = FragmentEngine::try_new(Arc::new(seekable_store(&example_triples())), config())
        .unwrap();
    let engine = CachingFragmentEngine::new(engine);
    engine.execute(&typed_request("1")).unwrap();

    engine.clear();
    assert_eq!(engine.statistics(), CacheStatistics::default());
}

#[test]
fn invalid_config_is_rejected() {
    let result = FragmentEngine::try_new(
        Arc::new(seekable_store(&example_triples())),
        FragmentEngineConfig::default().with_page_size(0),
    );
    assert!(matches!(result, Err(ConfigError::ZeroPageSize)));
}
