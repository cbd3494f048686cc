use crate::index::IndexConfigurationError;
use itertools::Itertools;
use ldf_model::TriplePosition::{Object, Predicate, Subject};
use ldf_model::{EncodedTriple, EncodedTriplePattern, TermId, TriplePosition};
use std::fmt::{Display, Formatter};

/// The order in which an index sorts the components of its triples.
///
/// Each [TriplePosition] appears exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexComponents([TriplePosition; 3]);

impl IndexComponents {
    /// Sorted by subject, then predicate, then object.
    pub const SPO: IndexComponents = IndexComponents([Subject, Predicate, Object]);
    /// Sorted by predicate, then object, then subject.
    pub const POS: IndexComponents = IndexComponents([Predicate, Object, Subject]);
    /// Sorted by object, then subject, then predicate.
    pub const OSP: IndexComponents = IndexComponents([Object, Subject, Predicate]);

    /// Creates an ordering from `components`.
    ///
    /// Returns [IndexConfigurationError::DuplicateComponent] if a position is repeated.
    pub fn try_new(components: [TriplePosition; 3]) -> Result<Self, IndexConfigurationError> {
        if !components.iter().all_unique() {
            return Err(IndexConfigurationError::DuplicateComponent);
        }
        Ok(IndexComponents(components))
    }

    /// Returns a reference to the inner array.
    pub fn inner(&self) -> &[TriplePosition; 3] {
        &self.0
    }

    /// Reorders `triple` from SPO into the order of this index.
    pub fn reorder(&self, triple: &EncodedTriple) -> [TermId; 3] {
        self.0.map(|position| triple.get(position))
    }

    /// Reorders `pattern` from SPO into the order of this index.
    pub fn reorder_pattern(&self, pattern: &EncodedTriplePattern) -> [Option<TermId>; 3] {
        self.0.map(|position| pattern.get(position))
    }

    /// Restores an SPO triple from an entry in the order of this index.
    pub fn restore(&self, entry: &[TermId; 3]) -> EncodedTriple {
        let mut spo = [entry[0]; 3];
        for (value, position) in entry.iter().zip(self.0) {
            spo[position.spo_index()] = *value;
        }
        EncodedTriple::from_array(spo)
    }

    /// Returns the number of leading components that `pattern` binds.
    ///
    /// The longer the bound prefix, the smaller is the contiguous range of the index that must be
    /// scanned.
    pub fn bound_prefix_len(&self, pattern: &EncodedTriplePattern) -> usize {
        self.0
            .iter()
            .take_while(|position| pattern.get(**position).is_some())
            .count()
    }
}

impl Display for IndexComponents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for component in self.0.iter() {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}
