use crate::index::{IndexConfigurationError, TripleIndex};
use ldf_model::EncodedTriplePattern;

/// Holds one index per configured ordering of the triple components (e.g., SPO, POS) and picks
/// the one that serves a pattern best.
///
/// For example, the pattern `<S> <P> ?o` can be best served by having an SPO index. The scan
/// would then look up the contiguous range of entries starting with `<S> <P>`. However, the
/// triple pattern `?s <P> <O>` cannot be efficiently evaluated with an SPO index. For this
/// pattern, the store should use a POS index.
///
/// The [IndexPermutations] allows managing multiple such indices.
#[derive(Debug)]
pub struct IndexPermutations<TIndex: TripleIndex> {
    /// The index variations.
    indexes: Vec<TIndex>,
}

impl<TIndex: TripleIndex> IndexPermutations<TIndex> {
    /// Creates a new [IndexPermutations].
    pub fn try_new(indexes: Vec<TIndex>) -> Result<Self, IndexConfigurationError> {
        if indexes.is_empty() {
            return Err(IndexConfigurationError::NoIndex);
        }
        Ok(Self { indexes })
    }

    /// Chooses the index for scanning the given `pattern`.
    ///
    /// The index with the longest bound prefix wins. On equality, the index that was configured
    /// first is used.
    pub fn choose_index(&self, pattern: &EncodedTriplePattern) -> &TIndex {
        let mut best = &self.indexes[0];
        let mut best_score = best.components().bound_prefix_len(pattern);
        for index in &self.indexes[1..] {
            let score = index.components().bound_prefix_len(pattern);
            if score > best_score {
                best = index;
                best_score = score;
            }
        }
        best
    }

    /// Returns the number of triples. All indexes hold the same triples.
    pub fn len(&self) -> usize {
        self.indexes[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
