//! The fragment engine of a Linked Data Fragments server.
//!
//! A fragment is one page of the triples that match a triple pattern, together with an estimate of
//! the total number of matches. The engine computes two kinds of fragments:
//! - [FragmentEngine::compute_fragment] pages through the matches of a single pattern.
//! - [FragmentEngine::compute_binding_restricted_fragment] additionally restricts the pattern by a
//!   [BindingTable](ldf_model::BindingTable). Every row of the table is substituted into the
//!   pattern and the matches of all distinct sub-patterns are paged as one sequence.
//!
//! Reported totals are estimates. They never undershoot the number of matches that a page has
//! already proven to exist and they are exact whenever the matches were exhausted within the page.
//! A total of zero is only reported if the pattern has no matches.
//!
//! The engine is read-only and holds no mutable state. [CachingFragmentEngine] memoizes computed
//! fragments in a [BoundedCache].

mod bindings;
mod cache;
mod config;
mod engine;
mod error;
mod filter;
mod fragment;
mod request;
mod resolver;
mod triple_pattern;

pub use cache::{BoundedCache, LruCache, NopCache};
pub use config::FragmentEngineConfig;
pub use engine::{CacheStatistics, CachingFragmentEngine, FragmentEngine, FragmentKey};
pub use error::{ConfigError, FragmentError, InvalidRequestError};
pub use filter::{FilteredCursor, RepeatedVariableFilter};
pub use fragment::Fragment;
pub use request::{parse_term_parameter, parse_values_parameter, FragmentRequest, PageLinks};
pub use resolver::{PatternResolver, Resolution, ResolvedPattern};
