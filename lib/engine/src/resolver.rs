use crate::filter::{FilteredCursor, RepeatedVariableFilter};
use ldf_common::{MatchCursor, TermDictionary, TripleSource};
use ldf_model::{EncodedTriplePattern, PatternSlot, StorageError, TermRef, TriplePattern};

/// The outcome of resolving a [TriplePattern] against a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A bound term of the pattern is unknown to the dictionary. The pattern has no matches.
    NoMatch,
    /// The pattern may have matches.
    Resolved(ResolvedPattern),
}

/// A [TriplePattern] translated into store-level constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPattern {
    constraints: EncodedTriplePattern,
    filter: Option<RepeatedVariableFilter>,
}

impl ResolvedPattern {
    /// Returns the store-level constraints. Variables are unconstrained.
    pub fn constraints(&self) -> &EncodedTriplePattern {
        &self.constraints
    }

    /// Returns the filter that must be applied to all matches of the constraints, if the pattern
    /// repeats a variable.
    pub fn filter(&self) -> Option<&RepeatedVariableFilter> {
        self.filter.as_ref()
    }

    /// Searches `source` for `constraints` and applies the repeated-variable filter of this
    /// pattern to the matches.
    ///
    /// The `constraints` must be at least as restrictive as the constraints of this pattern.
    pub fn search<'source, TSource: TripleSource + ?Sized>(
        &self,
        source: &'source TSource,
        constraints: &EncodedTriplePattern,
    ) -> Result<Box<dyn MatchCursor + 'source>, StorageError> {
        let cursor = source.search(constraints)?;
        Ok(match &self.filter {
            None => cursor,
            Some(filter) => Box::new(FilteredCursor::new(cursor, filter.clone())),
        })
    }
}

/// Resolves the bound terms of a [TriplePattern] to the ids of a [TermDictionary].
pub struct PatternResolver<'dictionary> {
    dictionary: &'dictionary dyn TermDictionary,
}

impl<'dictionary> PatternResolver<'dictionary> {
    pub fn new(dictionary: &'dictionary dyn TermDictionary) -> Self {
        Self { dictionary }
    }

    /// Resolves `pattern`.
    ///
    /// Only the bound slots are looked up. The first unknown term stops the resolution with
    /// [Resolution::NoMatch].
    pub fn resolve(&self, pattern: &TriplePattern) -> Result<Resolution, StorageError> {
        let mut constraints = EncodedTriplePattern::ANY;
        for (position, slot) in pattern.slots() {
            match slot {
                PatternSlot::Bound(term) => match self.dictionary.lookup(TermRef::from(term))? {
                    Some(id) => constraints.set(position, Some(id)),
                    None => {
                        tracing::debug!(%pattern, %position, "Term is unknown to the dictionary");
                        return Ok(Resolution::NoMatch);
                    }
                },
                PatternSlot::Variable(_) => {}
            }
        }

        Ok(Resolution::Resolved(ResolvedPattern {
            constraints,
            filter: RepeatedVariableFilter::for_pattern(pattern),
        }))
    }
}
