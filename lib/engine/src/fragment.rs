use ldf_model::Triple;

/// One page of the triples that match a pattern together with an estimate of the total number of
/// matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    triples: Vec<Triple>,
    total_size: u64,
}

impl Fragment {
    pub fn new(triples: Vec<Triple>, total_size: u64) -> Self {
        Self {
            triples,
            total_size,
        }
    }

    /// Creates the fragment of a pattern without any match.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Returns the estimated number of matches across all pages.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Returns the number of triples in this page.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
