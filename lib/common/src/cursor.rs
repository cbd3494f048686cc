use ldf_model::{EncodedTriple, StorageError};
use thiserror::Error;

/// An error raised while positioning a [MatchCursor].
#[derive(Debug, Error)]
pub enum SeekError {
    /// The requested position lies at or behind the last match of the cursor.
    ///
    /// This is an expected condition when paging past the end of the data. `length` is the total
    /// number of matches of the cursor.
    #[error("Cannot seek to position {position}, the cursor only has {length} matches")]
    OutOfRange { position: u64, length: u64 },
    /// The cursor cannot jump to a position.
    #[error("The cursor does not support seeking")]
    Unsupported,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A lazy sequence of the triples that match a store-level pattern.
///
/// Cursors are owned by a single request and are not shared across threads.
pub trait MatchCursor {
    /// Returns true if another match is available.
    fn has_next(&mut self) -> Result<bool, StorageError>;

    /// Returns the next match, or [None] if the cursor is exhausted.
    fn next_match(&mut self) -> Result<Option<EncodedTriple>, StorageError>;

    /// Returns a fast estimate of the total number of matches.
    ///
    /// The estimate may be inexact in both directions. It is zero only if the cursor is empty.
    fn estimated_count(&self) -> u64;

    /// Returns true if [Self::seek] can position the cursor directly.
    fn supports_seek(&self) -> bool;

    /// Positions the cursor such that the next match is the one at `position`, counted from the
    /// start of the cursor.
    fn seek(&mut self, position: u64) -> Result<(), SeekError>;

    /// Positions the cursor at its first match.
    fn restart(&mut self);
}

impl<T: MatchCursor + ?Sized> MatchCursor for Box<T> {
    fn has_next(&mut self) -> Result<bool, StorageError> {
        (**self).has_next()
    }

    fn next_match(&mut self) -> Result<Option<EncodedTriple>, StorageError> {
        (**self).next_match()
    }

    fn estimated_count(&self) -> u64 {
        (**self).estimated_count()
    }

    fn supports_seek(&self) -> bool {
        (**self).supports_seek()
    }

    fn seek(&mut self, position: u64) -> Result<(), SeekError> {
        (**self).seek(position)
    }

    fn restart(&mut self) {
        (**self).restart();
    }
}
