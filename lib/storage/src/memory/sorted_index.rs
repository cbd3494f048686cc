use crate::index::{IndexComponents, TripleIndex};
use ldf_model::{EncodedTriple, EncodedTriplePattern, TermId};
use std::ops::Range;

/// A frozen triple index that stores its entries as a sorted vector.
///
/// Every entry holds the ids of one triple in the order of the index [IndexComponents]. All
/// triples that share a bound prefix are therefore stored contiguously and can be found by two
/// binary searches.
#[derive(Debug)]
pub struct SortedTripleIndex {
    components: IndexComponents,
    entries: Vec<[TermId; 3]>,
}

impl SortedTripleIndex {
    /// Creates a new index over the given distinct `triples`.
    pub fn new<'triple>(
        components: IndexComponents,
        triples: impl IntoIterator<Item = &'triple EncodedTriple>,
    ) -> Self {
        let mut entries = triples
            .into_iter()
            .map(|triple| components.reorder(triple))
            .collect::<Vec<_>>();
        entries.sort_unstable();
        entries.dedup();
        Self {
            components,
            entries,
        }
    }

    /// Returns the range of entries that share the bound prefix of `pattern`.
    pub fn prefix_range(&self, pattern: &EncodedTriplePattern) -> Range<usize> {
        let reordered = self.components.reorder_pattern(pattern);
        let prefix = reordered
            .iter()
            .map_while(|slot| *slot)
            .collect::<Vec<_>>();
        if prefix.is_empty() {
            return 0..self.entries.len();
        }

        let len = prefix.len();
        let start = self
            .entries
            .partition_point(|entry| entry[..len] < prefix[..]);
        let end = self
            .entries
            .partition_point(|entry| entry[..len] <= prefix[..]);
        start..end
    }

    /// Returns the entries in the given `range`.
    pub fn entries(&self, range: Range<usize>) -> &[[TermId; 3]] {
        &self.entries[range]
    }
}

impl TripleIndex for SortedTripleIndex {
    fn components(&self) -> IndexComponents {
        self.components
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
