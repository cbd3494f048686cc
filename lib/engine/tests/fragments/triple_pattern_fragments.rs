use crate::{
    any_pattern, ex, example_triples, rdf_type, scanning_store, seekable_store, var,
    FailingSource,
};
use insta::assert_debug_snapshot;
use ldf_engine::{FragmentEngine, FragmentError, InvalidRequestError};
use ldf_model::{Triple, TriplePattern};
use ldf_storage::memory::MemTripleStore;
use std::sync::Arc;

fn engines() -> Vec<FragmentEngine<MemTripleStore>> {
    let triples = example_triples();
    vec![
        FragmentEngine::new(Arc::new(seekable_store(&triples))),
        FragmentEngine::new(Arc::new(scanning_store(&triples))),
    ]
}

fn typed_pattern() -> TriplePattern {
    TriplePattern::new(var("s"), rdf_type(), var("o"))
}

#[test]
fn first_page_holds_all_matches() {
    for engine in engines() {
        let fragment = engine.compute_fragment(&typed_pattern(), 0, 10).unwrap();
        assert_eq!(fragment.len(), 5);
        assert_eq!(fragment.total_size(), 5);
    }
}

#[test]
fn page_with_offset_holds_remaining_matches() {
    for engine in engines() {
        let fragment = engine.compute_fragment(&typed_pattern(), 3, 10).unwrap();
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.total_size(), 5);
    }
}

#[test]
fn unknown_term_yields_empty_fragment() {
    for engine in engines() {
        let pattern = TriplePattern::new(ex("unknown"), var("p"), var("o"));
        let fragment = engine.compute_fragment(&pattern, 0, 10).unwrap();
        assert!(fragment.is_empty());
        assert_eq!(fragment.total_size(), 0);
    }
}

#[test]
fn known_terms_without_matches_yield_empty_fragment() {
    for engine in engines() {
        // Both terms exist, but never in this combination.
        let pattern = TriplePattern::new(ex("Thing"), ex("knows"), var("o"));
        let fragment = engine.compute_fragment(&pattern, 0, 10).unwrap();
        assert!(fragment.is_empty());
        assert_eq!(fragment.total_size(), 0);
    }
}

#[test]
fn full_page_never_undershoots() {
    for engine in engines() {
        let fragment = engine.compute_fragment(&typed_pattern(), 1, 2).unwrap();
        assert_eq!(fragment.len(), 2);
        assert!(fragment.total_size() >= 4);
    }
}

#[test]
fn offset_beyond_data_signals_existing_matches() {
    for engine in engines() {
        let fragment = engine.compute_fragment(&typed_pattern(), 20, 10).unwrap();
        assert!(fragment.is_empty());
        assert!(fragment.total_size() >= 1);
    }
}

#[test]
fn scan_ending_exactly_at_offset_signals_existing_matches() {
    let engine = FragmentEngine::new(Arc::new(scanning_store(&example_triples())));

    // The scan yields exactly five matches, so stepping reaches the offset and nothing remains.
    let fragment = engine.compute_fragment(&typed_pattern(), 5, 10).unwrap();
    assert!(fragment.is_empty());
    // The scanned range covers all nine triples of the SPO index.
    assert_eq!(fragment.total_size(), 9);
}

#[test]
fn pages_partition_all_matches() {
    for engine in engines() {
        let all = engine.compute_fragment(&any_pattern(), 0, 100).unwrap();
        assert_eq!(all.len(), 9);

        let mut paged: Vec<Triple> = Vec::new();
        let mut offset = 0;
        loop {
            let fragment = engine.compute_fragment(&any_pattern(), offset, 2).unwrap();
            let returned = fragment.len() as u64;
            assert!(returned <= 2);
            if returned > 0 {
                assert!(fragment.total_size() >= offset + returned);
            }
            if returned < 2 {
                assert_eq!(fragment.total_size(), offset + returned);
            }
            paged.extend(fragment.into_triples());
            if returned < 2 {
                break;
            }
            offset += 2;
        }
        assert_eq!(paged, all.into_triples());
    }
}

#[test]
fn repeated_variable_requires_equal_terms() {
    let pattern = TriplePattern::new(var("x"), ex("knows"), var("x"));
    let results = engines()
        .iter()
        .map(|engine| {
            let fragment = engine.compute_fragment(&pattern, 0, 10).unwrap();
            let mut triples = fragment
                .triples()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            triples.sort();
            (triples, fragment.total_size())
        })
        .collect::<Vec<_>>();

    assert_eq!(results[0], results[1]);
    let (triples, total_size) = &results[0];
    assert_debug_snapshot!(triples, @r#"
    [
        "<http://example.com/r1> <http://example.com/knows> <http://example.com/r1>",
        "<http://example.com/r2> <http://example.com/knows> <http://example.com/r2>",
    ]
    "#);
    assert_eq!(*total_size, 2);
}

#[test]
fn repeated_variable_with_offset() {
    for engine in engines() {
        let pattern = TriplePattern::new(var("x"), ex("knows"), var("x"));
        let fragment = engine.compute_fragment(&pattern, 1, 10).unwrap();
        assert_eq!(fragment.len(), 1);
        assert_eq!(fragment.total_size(), 2);
        for triple in fragment.triples() {
            assert_eq!(triple.subject.to_string(), triple.object.to_string());
        }
    }
}

#[test]
fn repeated_variable_without_equal_terms_is_empty() {
    for engine in engines() {
        let pattern = TriplePattern::new(var("x"), rdf_type(), var("x"));
        let fragment = engine.compute_fragment(&pattern, 0, 10).unwrap();
        assert!(fragment.is_empty());
        assert_eq!(fragment.total_size(), 0);
    }
}

#[test]
fn repeated_calls_are_idempotent() {
    for engine in engines() {
        let first = engine.compute_fragment(&any_pattern(), 2, 3).unwrap();
        let second = engine.compute_fragment(&any_pattern(), 2, 3).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn zero_limit_is_rejected() {
    for engine in engines() {
        let result = engine.compute_fragment(&typed_pattern(), 0, 0);
        assert!(matches!(
            result,
            Err(FragmentError::InvalidRequest(InvalidRequestError::ZeroLimit))
        ));
    }
}

#[test]
fn storage_failures_are_propagated() {
    let source = FailingSource {
        inner: seekable_store(&example_triples()),
        fail_after: 2,
    };
    let engine = FragmentEngine::new(Arc::new(source));
    let result = engine.compute_fragment(&typed_pattern(), 0, 10);
    assert!(matches!(result, Err(FragmentError::Storage(_))));
}

#[test]
fn concurrent_requests() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&example_triples())));
    std::thread::scope(|scope| {
        for offset in 0..4 {
            let engine = &engine;
            scope.spawn(move || {
                let fragment = engine.compute_fragment(&typed_pattern(), offset, 1).unwrap();
                assert_eq!(fragment.len(), 1);
            });
        }
    });
}
