use crate::index::{IndexComponents, IndexConfigurationError, IndexPermutations, TripleIndex};
use crate::memory::{MemTermDictionary, ScanCursor, SliceCursor, SortedTripleIndex};
use ldf_common::{MatchCursor, TermDictionary, TripleSource};
use ldf_model::{EncodedTriple, EncodedTriplePattern, StorageError, TripleRef};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Collects triples for a [MemTripleStore].
///
/// Terms are encoded while inserting. Duplicate triples are ignored.
#[derive(Debug)]
pub struct MemTripleStoreBuilder {
    dictionary: Arc<MemTermDictionary>,
    permutations: Vec<IndexComponents>,
    triples: FxHashSet<EncodedTriple>,
}

impl MemTripleStoreBuilder {
    /// Creates a new builder that maintains an SPO, a POS, and an OSP index.
    pub fn new() -> Self {
        Self {
            dictionary: Arc::new(MemTermDictionary::new()),
            permutations: vec![IndexComponents::SPO, IndexComponents::POS, IndexComponents::OSP],
            triples: FxHashSet::default(),
        }
    }

    /// Replaces the maintained indexes.
    ///
    /// Returns an error if `permutations` is empty or contains the same ordering twice.
    pub fn with_permutations(
        mut self,
        permutations: impl IntoIterator<Item = IndexComponents>,
    ) -> Result<Self, IndexConfigurationError> {
        let mut distinct = Vec::new();
        for components in permutations {
            if distinct.contains(&components) {
                return Err(IndexConfigurationError::DuplicateComponent);
            }
            distinct.push(components);
        }
        if distinct.is_empty() {
            return Err(IndexConfigurationError::NoIndex);
        }

        self.permutations = distinct;
        Ok(self)
    }

    /// Inserts a single triple. Returns true if the triple was not yet part of the store.
    pub fn insert<'triple>(
        &mut self,
        triple: impl Into<TripleRef<'triple>>,
    ) -> Result<bool, StorageError> {
        let triple = triple.into();
        let encoded = EncodedTriple::new(
            self.dictionary.encode_term(triple.subject)?,
            self.dictionary.encode_term(triple.predicate)?,
            self.dictionary.encode_term(triple.object)?,
        );
        Ok(self.triples.insert(encoded))
    }

    /// Inserts all `triples` and returns the number of newly inserted triples.
    pub fn extend<'triple>(
        &mut self,
        triples: impl IntoIterator<Item = impl Into<TripleRef<'triple>>>,
    ) -> Result<usize, StorageError> {
        let mut inserted = 0;
        for triple in triples {
            if self.insert(triple)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Sorts the collected triples into the configured indexes.
    #[allow(clippy::expect_used, reason = "Permutations are validated on configuration")]
    pub fn build(self) -> MemTripleStore {
        let indexes = self
            .permutations
            .iter()
            .map(|components| SortedTripleIndex::new(*components, &self.triples))
            .collect::<Vec<_>>();
        tracing::debug!(
            triples = self.triples.len(),
            terms = self.dictionary.len(),
            indexes = indexes.len(),
            "Built in-memory triple store"
        );

        MemTripleStore {
            dictionary: self.dictionary,
            indexes: IndexPermutations::try_new(indexes)
                .expect("Permutations are never empty"),
        }
    }
}

impl Default for MemTripleStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen, dictionary-encoded triple store held in memory.
///
/// Searches return the matches of a pattern in the order of the chosen index, which is stable
/// across searches.
#[derive(Debug)]
pub struct MemTripleStore {
    dictionary: Arc<MemTermDictionary>,
    indexes: IndexPermutations<SortedTripleIndex>,
}

impl MemTripleStore {
    /// Creates a new [MemTripleStoreBuilder].
    pub fn builder() -> MemTripleStoreBuilder {
        MemTripleStoreBuilder::new()
    }

    /// Returns the number of distinct triples.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

impl TripleSource for MemTripleStore {
    fn dictionary(&self) -> &dyn TermDictionary {
        self.dictionary.as_ref()
    }

    fn search(
        &self,
        pattern: &EncodedTriplePattern,
    ) -> Result<Box<dyn MatchCursor + '_>, StorageError> {
        let index = self.indexes.choose_index(pattern);
        let components = index.components();
        let range = index.prefix_range(pattern);
        let entries = index.entries(range);

        let prefix_len = components.bound_prefix_len(pattern);
        if prefix_len == pattern.bound_count() {
            tracing::trace!(%pattern, index = %components, matches = entries.len(), "Searching slice");
            Ok(Box::new(SliceCursor::new(components, entries)))
        } else {
            tracing::trace!(%pattern, index = %components, scanned = entries.len(), "Searching with scan");
            Ok(Box::new(ScanCursor::new(components, entries, *pattern)))
        }
    }
}
