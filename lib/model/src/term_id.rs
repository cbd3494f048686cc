use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use thiserror::Error;

/// Identifies an RDF term within the dictionary of a single store.
///
/// Valid ids are never zero. The reserved values of the fragment protocol are not encoded as
/// sentinel ids:
/// - "any term" is a missing constraint, i.e., `None` in an
///   [EncodedTriplePattern](crate::EncodedTriplePattern).
/// - "unknown term" is a failed dictionary lookup, i.e., `None` returned from the lookup.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct TermId(NonZeroU32);

impl TermId {
    /// The smallest valid id.
    pub const MIN: TermId = TermId(NonZeroU32::MIN);
    pub const MAX: TermId = TermId(NonZeroU32::MAX);

    /// Creates a new [TermId]. Returns [None] for the reserved value `0`.
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn as_u32(self) -> u32 {
        self.0.get()
    }

    pub fn next(self) -> Option<TermId> {
        self.0.checked_add(1).map(TermId)
    }
}

impl From<NonZeroU32> for TermId {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Error)]
#[error("0 is not a valid term id")]
pub struct InvalidTermIdError;

impl TryFrom<u32> for TermId {
    type Error = InvalidTermIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidTermIdError)
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
