//! Contains general data structures on triple indexes.
//!
//! A triple index represents a particular sorting of the triple components subject, predicate, and
//! object. For example, the [IndexComponents::SPO] index represents that exact ordering while the
//! [IndexComponents::POS] has the predicate as the first component. Different triple patterns are
//! better suited for different indexes.
//!
//! The primary trait in this module is the [TripleIndex]. In addition, [IndexPermutations]
//! provides access to multiple indexes while implementing the index selection logic.

mod components;
mod error;
mod permutations;

pub use components::*;
pub use error::*;
pub use permutations::*;

/// Represents a single instance of a triple index with a given ordering.
pub trait TripleIndex {
    /// Returns the components of the index.
    fn components(&self) -> IndexComponents;

    /// Returns the total number of triples.
    fn len(&self) -> usize;

    /// Returns true if the index holds no triples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
