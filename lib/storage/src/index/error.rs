use thiserror::Error;

/// An error raised when an index configuration is invalid.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IndexConfigurationError {
    #[error("An index must contain every triple component exactly once")]
    DuplicateComponent,
    #[error("At least one index must be configured")]
    NoIndex,
}
