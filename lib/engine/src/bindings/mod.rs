//! Binding-restricted fragments.
//!
//! Every row of a [BindingTable](ldf_model::BindingTable) is substituted into the pattern, which
//! yields a concrete sub-pattern per row. The matches of all distinct sub-patterns form one
//! sequence that is paged in two phases: the skip phase counts matches until the offset is reached
//! and the fill phase collects the page. If the page is full, the total size is extrapolated from
//! the store estimates of a sample of the sub-patterns.

mod fragment;
mod generator;
mod replay;

pub(crate) use fragment::compute_binding_restricted_fragment;
