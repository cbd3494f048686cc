use ldf_common::{MatchCursor, SeekError};
use ldf_model::{EncodedTriple, StorageError, TriplePattern, TriplePosition, Variable};

/// Rejects triples that bind a repeated variable of a pattern to different terms.
///
/// A store-level pattern cannot express that two of its slots must be equal. For the pattern
/// `?x <p> ?x`, the store is therefore searched with `* <p> *` and the filter removes every match
/// whose subject differs from its object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedVariableFilter {
    variable: Variable,
    positions: Vec<TriplePosition>,
}

impl RepeatedVariableFilter {
    /// Creates a filter for the variable of `pattern` that occupies more than one slot.
    ///
    /// Returns [None] if every variable occupies at most one slot.
    pub fn for_pattern(pattern: &TriplePattern) -> Option<Self> {
        // Three slots can hold at most one repeated variable.
        pattern.variables().into_iter().find_map(|variable| {
            let positions = pattern.positions_of(variable);
            (positions.len() > 1).then(|| Self {
                variable: variable.clone(),
                positions,
            })
        })
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    /// Returns the positions that must hold the same term.
    pub fn positions(&self) -> &[TriplePosition] {
        &self.positions
    }

    /// Returns true if `triple` holds the same term at all positions of the variable.
    pub fn evaluate(&self, triple: &EncodedTriple) -> bool {
        let mut values = self.positions.iter().map(|position| triple.get(*position));
        let Some(first) = values.next() else {
            return true;
        };
        values.all(|value| value == first)
    }
}

/// A [MatchCursor] that only yields the matches of its inner cursor that pass a
/// [RepeatedVariableFilter].
///
/// The number of matches that pass the filter is unknown. The cursor reports the estimate of the
/// inner cursor and cannot seek.
#[derive(Debug)]
pub struct FilteredCursor<TCursor> {
    inner: TCursor,
    filter: RepeatedVariableFilter,
    peeked: Option<EncodedTriple>,
}

impl<TCursor: MatchCursor> FilteredCursor<TCursor> {
    pub fn new(inner: TCursor, filter: RepeatedVariableFilter) -> Self {
        Self {
            inner,
            filter,
            peeked: None,
        }
    }

    fn advance(&mut self) -> Result<Option<EncodedTriple>, StorageError> {
        while let Some(triple) = self.inner.next_match()? {
            if self.filter.evaluate(&triple) {
                return Ok(Some(triple));
            }
        }
        Ok(None)
    }
}

impl<TCursor: MatchCursor> MatchCursor for FilteredCursor<TCursor> {
    fn has_next(&mut self) -> Result<bool, StorageError> {
        if self.peeked.is_none() {
            self.peeked = self.advance()?;
        }
        Ok(self.peeked.is_some())
    }

    fn next_match(&mut self) -> Result<Option<EncodedTriple>, StorageError> {
        match self.peeked.take() {
            Some(triple) => Ok(Some(triple)),
            None => self.advance(),
        }
    }

    fn estimated_count(&self) -> u64 {
        self.inner.estimated_count()
    }

    fn supports_seek(&self) -> bool {
        false
    }

    fn seek(&mut self, _position: u64) -> Result<(), SeekError> {
        Err(SeekError::Unsupported)
    }

    fn restart(&mut self) {
        self.inner.restart();
        self.peeked = None;
    }
}
