use crate::memory::encoding::EncodedTerm;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use ldf_common::TermDictionary;
use ldf_model::{CorruptionError, StorageError, Term, TermId, TermRef};
use rustc_hash::FxBuildHasher;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A dictionary that assigns [TermId]s to RDF terms in memory.
///
/// Every string of a term (IRI, literal value, datatype, language tag) is stored once, no matter
/// how many terms refer to it. Ids are handed out in insertion order, starting at 1.
#[derive(Debug)]
pub struct MemTermDictionary {
    strings: StringInterner,
    next_id: AtomicU32,
    ids: DashMap<EncodedTerm, TermId, FxBuildHasher>,
    terms: DashMap<TermId, EncodedTerm, FxBuildHasher>,
}

impl Default for MemTermDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl MemTermDictionary {
    /// Creates a new empty [MemTermDictionary].
    pub fn new() -> Self {
        Self {
            strings: StringInterner::default(),
            next_id: AtomicU32::new(1),
            ids: DashMap::with_hasher(FxBuildHasher),
            terms: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Returns the number of terms in the dictionary.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the id of `term`. Unknown terms are assigned the next free id.
    ///
    /// # Error
    ///
    /// Returns [CorruptionError::IdSpaceExhausted] if there is no free id left.
    pub fn encode_term<'term>(
        &self,
        term: impl Into<TermRef<'term>>,
    ) -> Result<TermId, StorageError> {
        let term = term.into();
        if let Some(id) = self.find_id(term) {
            return Ok(id);
        }

        let encoded =
            match EncodedTerm::encode(term, |value| Ok::<_, Infallible>(self.strings.intern(value)))
            {
                Ok(encoded) => encoded,
                Err(never) => match never {},
            };
        // Holding the entry serializes concurrent insertions of the same term.
        match self.ids.entry(encoded) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let id = TermId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
                    .ok_or(CorruptionError::IdSpaceExhausted)?;
                self.terms.insert(id, entry.key().clone());
                entry.insert(id);
                Ok(id)
            }
        }
    }

    /// Returns the id of `term` without interning anything.
    fn find_id(&self, term: TermRef<'_>) -> Option<TermId> {
        let encoded = EncodedTerm::encode(term, |value| self.strings.get(value).ok_or(())).ok()?;
        self.ids.get(&encoded).map(|id| *id)
    }
}

impl TermDictionary for MemTermDictionary {
    fn lookup(&self, term: TermRef<'_>) -> Result<Option<TermId>, StorageError> {
        Ok(self.find_id(term))
    }

    fn materialize(&self, id: TermId) -> Result<Term, StorageError> {
        let encoded = self
            .terms
            .get(&id)
            .ok_or(CorruptionError::UnknownTermId(id))?;
        Ok(encoded.as_term_ref().into_owned())
    }
}

/// Stores each distinct string once.
#[derive(Debug, Default)]
struct StringInterner(DashSet<Arc<str>, FxBuildHasher>);

impl StringInterner {
    fn get(&self, value: &str) -> Option<Arc<str>> {
        self.0.get(value).map(|entry| Arc::clone(entry.key()))
    }

    fn intern(&self, value: &str) -> Arc<str> {
        if let Some(interned) = self.get(value) {
            return interned;
        }
        let interned = Arc::<str>::from(value);
        self.0.insert(Arc::clone(&interned));
        interned
    }
}
