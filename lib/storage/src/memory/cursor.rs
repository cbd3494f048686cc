use crate::index::IndexComponents;
use ldf_common::{MatchCursor, SeekError};
use ldf_model::{EncodedTriple, EncodedTriplePattern, StorageError, TermId};

/// A cursor over a contiguous range of a sorted index in which every entry matches.
///
/// The length of the range is known, hence the estimate is exact and the cursor can seek.
#[derive(Debug)]
pub struct SliceCursor<'index> {
    components: IndexComponents,
    entries: &'index [[TermId; 3]],
    position: usize,
}

impl<'index> SliceCursor<'index> {
    pub fn new(components: IndexComponents, entries: &'index [[TermId; 3]]) -> Self {
        Self {
            components,
            entries,
            position: 0,
        }
    }
}

impl MatchCursor for SliceCursor<'_> {
    fn has_next(&mut self) -> Result<bool, StorageError> {
        Ok(self.position < self.entries.len())
    }

    fn next_match(&mut self) -> Result<Option<EncodedTriple>, StorageError> {
        let Some(entry) = self.entries.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(self.components.restore(entry)))
    }

    fn estimated_count(&self) -> u64 {
        self.entries.len() as u64
    }

    fn supports_seek(&self) -> bool {
        true
    }

    fn seek(&mut self, position: u64) -> Result<(), SeekError> {
        let length = self.entries.len() as u64;
        if position >= length {
            return Err(SeekError::OutOfRange { position, length });
        }
        // position < length <= usize::MAX
        self.position = usize::try_from(position).unwrap_or(self.entries.len());
        Ok(())
    }

    fn restart(&mut self) {
        self.position = 0;
    }
}

/// A cursor that scans a range of a sorted index and filters the entries that do not match a
/// pattern.
///
/// This is used if a bound slot of the pattern is not part of the bound prefix of the chosen
/// index. The number of matches is unknown, so the cursor reports the length of the scanned range
/// as its estimate and cannot seek.
#[derive(Debug)]
pub struct ScanCursor<'index> {
    components: IndexComponents,
    entries: &'index [[TermId; 3]],
    pattern: EncodedTriplePattern,
    position: usize,
    peeked: Option<EncodedTriple>,
}

impl<'index> ScanCursor<'index> {
    pub fn new(
        components: IndexComponents,
        entries: &'index [[TermId; 3]],
        pattern: EncodedTriplePattern,
    ) -> Self {
        Self {
            components,
            entries,
            pattern,
            position: 0,
            peeked: None,
        }
    }

    fn advance(&mut self) -> Option<EncodedTriple> {
        while let Some(entry) = self.entries.get(self.position) {
            self.position += 1;
            let triple = self.components.restore(entry);
            if self.pattern.matches(&triple) {
                return Some(triple);
            }
        }
        None
    }
}

impl MatchCursor for ScanCursor<'_> {
    fn has_next(&mut self) -> Result<bool, StorageError> {
        if self.peeked.is_none() {
            self.peeked = self.advance();
        }
        Ok(self.peeked.is_some())
    }

    fn next_match(&mut self) -> Result<Option<EncodedTriple>, StorageError> {
        match self.peeked.take() {
            Some(triple) => Ok(Some(triple)),
            None => Ok(self.advance()),
        }
    }

    fn estimated_count(&self) -> u64 {
        self.entries.len() as u64
    }

    fn supports_seek(&self) -> bool {
        false
    }

    fn seek(&mut self, _position: u64) -> Result<(), SeekError> {
        Err(SeekError::Unsupported)
    }

    fn restart(&mut self) {
        self.position = 0;
        self.peeked = None;
    }
}
