use crate::{TermId, TriplePosition};
use std::error::Error;
use std::io;
use thiserror::Error;

/// An error raised while reading from a triple store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The dictionary or an index is inconsistent.
    #[error(transparent)]
    Corruption(#[from] CorruptionError),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl StorageError {
    /// Wraps an error of a store implementation.
    pub fn other(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Other(error.into())
    }
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            StorageError::Corruption(error) => error.into(),
            StorageError::Other(error) => Self::other(error),
        }
    }
}

/// The contents of a store contradict each other.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorruptionError {
    /// An index refers to an id that the dictionary does not know.
    #[error("Unknown term id {0}.")]
    UnknownTermId(TermId),
    /// A term was stored in a position where RDF does not allow it, e.g., a literal subject.
    #[error("Term {id} is not allowed in position {position}.")]
    MisplacedTerm { id: TermId, position: TriplePosition },
    /// The dictionary ran out of ids.
    #[error("The term id space is exhausted.")]
    IdSpaceExhausted,
}

impl From<CorruptionError> for io::Error {
    #[inline]
    fn from(error: CorruptionError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}
