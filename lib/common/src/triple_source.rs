use crate::{MatchCursor, TermDictionary};
use ldf_model::{EncodedTriplePattern, StorageError};
use std::sync::Arc;

/// A read-only, dictionary-encoded triple store.
///
/// # Consistency
///
/// A single request may issue many searches. It is the responsibility of the store to ensure that
/// all of them observe the same state, and that matches of a pattern are always returned in the
/// same order. Otherwise, consecutive pages of a fragment may overlap.
pub trait TripleSource: Send + Sync {
    /// Returns the dictionary of this store.
    fn dictionary(&self) -> &dyn TermDictionary;

    /// Returns a cursor over all triples that match `pattern`.
    fn search(
        &self,
        pattern: &EncodedTriplePattern,
    ) -> Result<Box<dyn MatchCursor + '_>, StorageError>;
}

impl<T: TripleSource + ?Sized> TripleSource for Arc<T> {
    fn dictionary(&self) -> &dyn TermDictionary {
        (**self).dictionary()
    }

    fn search(
        &self,
        pattern: &EncodedTriplePattern,
    ) -> Result<Box<dyn MatchCursor + '_>, StorageError> {
        (**self).search(pattern)
    }
}
