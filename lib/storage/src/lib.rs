#![doc(test(attr(deny(warnings))))]

//! Contains storage layer implementations for the Linked Data Fragments engine.
//!
//! The [memory] module provides a read-only, dictionary-encoded triple store that implements
//! [TripleSource](ldf_common::TripleSource).

pub mod index;
pub mod memory;
