use crate::{
    ex, example_triples, rdf_type, scanning_store, seekable_store, var, CountingSource,
    FailingSource,
};
use insta::assert_debug_snapshot;
use ldf_engine::{FragmentEngine, FragmentError, InvalidRequestError};
use ldf_model::{BindingTable, SolutionRow, Term, Triple, TriplePattern, Variable};
use std::collections::HashSet;
use std::sync::Arc;

fn table(variables: &[&str], rows: &[&[Option<Term>]]) -> BindingTable {
    BindingTable::try_new(
        variables.iter().map(|name| var(name)).collect(),
        rows.iter().map(|row| SolutionRow::new(row.to_vec())),
    )
    .unwrap()
}

fn term(name: &str) -> Option<Term> {
    Some(ex(name).into())
}

fn type_term() -> Option<Term> {
    Some(rdf_type().into())
}

/// Thirty objects, each of which is known by two subjects.
fn fan_in_triples() -> Vec<Triple> {
    (0..30)
        .flat_map(|i| {
            [
                Triple::new(ex(format!("a{i}")), ex("knows"), ex(format!("o{i}"))),
                Triple::new(ex(format!("b{i}")), ex("knows"), ex(format!("o{i}"))),
            ]
        })
        .collect()
}

fn fan_in_bindings() -> BindingTable {
    BindingTable::try_new(
        vec![var("o")],
        (0..30).map(|i| SolutionRow::new(vec![term(&format!("o{i}"))])),
    )
    .unwrap()
}

fn knows_pattern() -> TriplePattern {
    TriplePattern::new(var("s"), ex("knows"), var("o"))
}

#[test]
fn one_search_per_distinct_sub_pattern() {
    let source = Arc::new(CountingSource::new(seekable_store(&example_triples())));
    let engine = FragmentEngine::new(Arc::clone(&source));

    // ?x is not part of the pattern, so the first and the last row substitute the same predicate.
    let pattern = TriplePattern::new(var("s"), var("p"), ex("Thing"));
    let bindings = table(
        &["p", "x"],
        &[
            &[type_term(), term("1")],
            &[term("knows"), term("2")],
            &[type_term(), term("3")],
        ],
    );
    let fragment = engine
        .compute_binding_restricted_fragment(&pattern, &bindings, 0, 10)
        .unwrap();

    assert_eq!(fragment.len(), 5);
    assert_eq!(fragment.total_size(), 5);
    assert_eq!(source.searches().len(), 2);
}

#[test]
fn duplicate_rows_are_searched_once() {
    let source = Arc::new(CountingSource::new(seekable_store(&example_triples())));
    let engine = FragmentEngine::new(Arc::clone(&source));

    let pattern = TriplePattern::new(var("s"), var("p"), ex("Thing"));
    let bindings = table(
        &["p"],
        &[
            &[type_term()],
            &[term("knows")],
            &[type_term()],
        ],
    );
    let fragment = engine
        .compute_binding_restricted_fragment(&pattern, &bindings, 0, 10)
        .unwrap();

    assert_eq!(fragment.len(), 5);
    assert_eq!(source.searches().len(), 2);
}

#[test]
fn merges_matches_of_all_sub_patterns() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&example_triples())));
    let bindings = table(&["s"], &[&[term("r0")], &[term("r3")]]);
    let pattern = TriplePattern::new(var("s"), var("p"), var("o"));

    let fragment = engine
        .compute_binding_restricted_fragment(&pattern, &bindings, 0, 10)
        .unwrap();
    let triples = fragment
        .triples()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_debug_snapshot!(triples, @r#"
    [
        "<http://example.com/r0> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/Thing>",
        "<http://example.com/r0> <http://example.com/knows> <http://example.com/r1>",
        "<http://example.com/r3> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/Thing>",
        "<http://example.com/r3> <http://example.com/knows> <http://example.com/r0>",
    ]
    "#);
    assert_eq!(fragment.total_size(), 4);
}

#[test]
fn pages_partition_all_matches() {
    let triples = fan_in_triples();
    for store in [seekable_store(&triples), scanning_store(&triples)] {
        let engine = FragmentEngine::new(Arc::new(store));
        let bindings = fan_in_bindings();
        let all = engine
            .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 0, 100)
            .unwrap();
        assert_eq!(all.len(), 60);
        assert_eq!(all.total_size(), 60);

        let mut paged = Vec::new();
        let mut offset = 0;
        loop {
            let fragment = engine
                .compute_binding_restricted_fragment(&knows_pattern(), &bindings, offset, 7)
                .unwrap();
            let returned = fragment.len() as u64;
            if returned > 0 {
                assert!(fragment.total_size() >= offset + returned);
            }
            if returned < 7 {
                assert_eq!(fragment.total_size(), offset + returned);
            }
            paged.extend(fragment.into_triples());
            if returned < 7 {
                break;
            }
            offset += 7;
        }
        assert_eq!(paged, all.into_triples());
    }
}

#[test]
fn estimate_is_extrapolated_from_sample() {
    let source = Arc::new(CountingSource::new(seekable_store(&fan_in_triples())));
    let engine = FragmentEngine::new(Arc::clone(&source));

    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &fan_in_bindings(), 0, 5)
        .unwrap();

    // Ten sampled sub-patterns with two matches each, extrapolated to thirty sub-patterns.
    assert_eq!(fragment.len(), 5);
    assert_eq!(fragment.total_size(), 60);

    // Sub-patterns searched while paging are not searched again for the estimate.
    let searches = source.searches();
    assert_eq!(searches.len(), 10);
    assert_eq!(searches.iter().collect::<HashSet<_>>().len(), 10);
}

#[test]
fn small_tables_are_summed_exactly() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&fan_in_triples())));
    let bindings = BindingTable::try_new(
        vec![var("o")],
        (0..4).map(|i| SolutionRow::new(vec![term(&format!("o{i}"))])),
    )
    .unwrap();

    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 0, 3)
        .unwrap();
    assert_eq!(fragment.len(), 3);
    assert_eq!(fragment.total_size(), 8);
}

#[test]
fn estimate_never_undershoots() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&fan_in_triples())));
    let bindings = BindingTable::try_new(
        vec![var("o")],
        (0..2).map(|i| SolutionRow::new(vec![term(&format!("o{i}"))])),
    )
    .unwrap();

    // The page ends exactly at the last match, hence the total cannot be proven exact.
    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 1, 3)
        .unwrap();
    assert_eq!(fragment.len(), 3);
    assert!(fragment.total_size() >= 5);
}

#[test]
fn offset_beyond_data_reports_offset() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&fan_in_triples())));
    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &fan_in_bindings(), 100, 10)
        .unwrap();
    assert!(fragment.is_empty());
    assert_eq!(fragment.total_size(), 100);
}

#[test]
fn partial_last_page_reports_offset_plus_returned() {
    let engine = FragmentEngine::new(Arc::new(scanning_store(&fan_in_triples())));
    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &fan_in_bindings(), 55, 10)
        .unwrap();
    assert_eq!(fragment.len(), 5);
    assert_eq!(fragment.total_size(), 60);
}

#[test]
fn sampled_estimate_is_rounded_and_clamped() {
    // Objects o0..o6 have one subject, o7..o9 two and o10..o24 three (58 matches in total).
    let triples = (0..25)
        .flat_map(|i| {
            let subjects = match i {
                0..=6 => 1,
                7..=9 => 2,
                _ => 3,
            };
            (0..subjects).map(move |j| {
                Triple::new(ex(format!("s{i}_{j}")), ex("knows"), ex(format!("o{i}")))
            })
        })
        .collect::<Vec<_>>();
    let bindings = BindingTable::try_new(
        vec![var("o")],
        (0..25).map(|i| SolutionRow::new(vec![term(&format!("o{i}"))])),
    )
    .unwrap();
    let engine = FragmentEngine::new(Arc::new(seekable_store(&triples)));

    // The first ten sub-patterns have 13 matches, scaled by 25 / 10 to 32.5.
    let first = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 0, 2)
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.total_size(), 33);

    // The extrapolation undershoots what a later full page proves.
    let later = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 40, 5)
        .unwrap();
    assert_eq!(later.len(), 5);
    assert_eq!(later.total_size(), 46);
}

#[test]
fn overlapping_undef_rows_repeat_shared_matches() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&example_triples())));
    let pattern = TriplePattern::new(var("s"), ex("knows"), var("o"));
    let bindings = table(&["s", "o"], &[&[term("r0"), None], &[term("r0"), term("r1")]]);

    let fragment = engine
        .compute_binding_restricted_fragment(&pattern, &bindings, 0, 10)
        .unwrap();
    let expected = Triple::new(ex("r0"), ex("knows"), ex("r1"));
    assert_eq!(fragment.triples(), &[expected.clone(), expected]);
    assert_eq!(fragment.total_size(), 2);
}

#[test]
fn unknown_binding_values_are_ignored() {
    let source = Arc::new(CountingSource::new(seekable_store(&fan_in_triples())));
    let engine = FragmentEngine::new(Arc::clone(&source));
    let bindings = table(&["o"], &[&[term("unknown")], &[term("o1")]]);

    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 0, 10)
        .unwrap();
    assert_eq!(fragment.len(), 2);
    assert_eq!(fragment.total_size(), 2);
    assert_eq!(source.searches().len(), 1);
}

#[test]
fn only_unknown_binding_values_yield_empty_fragment() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&fan_in_triples())));
    let bindings = table(&["o"], &[&[term("unknown")]]);

    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 0, 10)
        .unwrap();
    assert!(fragment.is_empty());
    assert_eq!(fragment.total_size(), 0);
}

#[test]
fn unknown_pattern_term_yields_empty_fragment() {
    let source = Arc::new(CountingSource::new(seekable_store(&fan_in_triples())));
    let engine = FragmentEngine::new(Arc::clone(&source));
    let pattern = TriplePattern::new(var("s"), ex("unknown"), var("o"));

    let fragment = engine
        .compute_binding_restricted_fragment(&pattern, &fan_in_bindings(), 0, 10)
        .unwrap();
    assert!(fragment.is_empty());
    assert_eq!(fragment.total_size(), 0);
    assert!(source.searches().is_empty());
}

#[test]
fn empty_table_yields_empty_fragment() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&fan_in_triples())));
    let bindings = BindingTable::try_new(vec![var("o")], Vec::new()).unwrap();
    let fragment = engine
        .compute_binding_restricted_fragment(&knows_pattern(), &bindings, 0, 10)
        .unwrap();
    assert!(fragment.is_empty());
    assert_eq!(fragment.total_size(), 0);
}

#[test]
fn undef_values_leave_slot_unconstrained() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&example_triples())));
    let pattern = TriplePattern::new(var("s"), ex("knows"), var("o"));
    let bindings = table(&["s", "o"], &[&[term("r0"), None]]);

    let fragment = engine
        .compute_binding_restricted_fragment(&pattern, &bindings, 0, 10)
        .unwrap();
    assert_eq!(fragment.len(), 1);
    assert_eq!(fragment.total_size(), 1);
}

#[test]
fn repeated_variable_is_filtered() {
    for store in [
        seekable_store(&example_triples()),
        scanning_store(&example_triples()),
    ] {
        let engine = FragmentEngine::new(Arc::new(store));
        let pattern = TriplePattern::new(var("x"), var("p"), var("x"));
        let bindings = table(&["p"], &[&[term("knows")], &[type_term()]]);

        let fragment = engine
            .compute_binding_restricted_fragment(&pattern, &bindings, 0, 10)
            .unwrap();
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.total_size(), 2);
        for triple in fragment.triples() {
            assert_eq!(triple.subject.to_string(), triple.object.to_string());
        }
    }
}

#[test]
fn zero_limit_is_rejected() {
    let engine = FragmentEngine::new(Arc::new(seekable_store(&example_triples())));
    let result = engine.compute_binding_restricted_fragment(
        &knows_pattern(),
        &fan_in_bindings(),
        0,
        0,
    );
    assert!(matches!(
        result,
        Err(FragmentError::InvalidRequest(InvalidRequestError::ZeroLimit))
    ));
}

#[test]
fn storage_failures_are_propagated() {
    let source = FailingSource {
        inner: seekable_store(&fan_in_triples()),
        fail_after: 1,
    };
    let engine = FragmentEngine::new(Arc::new(source));
    let result =
        engine.compute_binding_restricted_fragment(&knows_pattern(), &fan_in_bindings(), 3, 10);
    assert!(matches!(result, Err(FragmentError::Storage(_))));
}

#[test]
fn variables_of_table_are_reported() {
    let bindings = fan_in_bindings();
    assert_eq!(bindings.variables(), &[Variable::new_unchecked("o")]);
}
