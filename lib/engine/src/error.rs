use ldf_model::{BindingTableError, StorageError, TriplePosition};
use thiserror::Error;

/// An error raised while computing a fragment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FragmentError {
    /// The request is malformed. Such errors are reported to the client and never retried.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),
    /// The store or its dictionary failed. Partially computed pages are discarded.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A client error in a fragment request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidRequestError {
    #[error("A fragment must contain at least one triple per page")]
    ZeroLimit,
    #[error("Pages are numbered starting with 1")]
    ZeroPage,
    #[error("Invalid term '{value}' at position {position}: {message}")]
    InvalidTerm {
        position: TriplePosition,
        value: String,
        message: String,
    },
    #[error("Invalid VALUES parameter: {0}")]
    InvalidValues(String),
}

impl From<BindingTableError> for InvalidRequestError {
    fn from(value: BindingTableError) -> Self {
        Self::InvalidValues(value.to_string())
    }
}

/// An error raised if a [FragmentEngineConfig](crate::FragmentEngineConfig) is invalid.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The page size must be at least 1")]
    ZeroPageSize,
    #[error("The estimation sample size must be at least 1")]
    ZeroSampleSize,
}
