use ldf_common::TermDictionary;
use ldf_model::{
    BindingTable, EncodedTriplePattern, SolutionRow, StorageError, Term, TermId, TermRef,
    TriplePattern, TriplePosition,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::slice;

/// Substitutes the rows of a [BindingTable] into a resolved pattern and yields the resulting
/// store-level sub-patterns.
///
/// Rows that bind a variable to a term unknown to the dictionary cannot contribute any match and
/// are skipped. Sub-patterns that were already yielded are suppressed unless the table determines
/// the pattern completely, in which case distinct rows always produce distinct sub-patterns.
///
/// Distinct sub-patterns may still overlap if the table contains UNDEF values, e.g., `(r0, UNDEF)`
/// and `(r0, r1)`. A triple matching both is yielded once per sub-pattern.
pub(crate) struct SubPatternGenerator<'table> {
    dictionary: &'table dyn TermDictionary,
    base: EncodedTriplePattern,
    /// The column of the binding table for each slot of the pattern.
    columns: [Option<usize>; 3],
    rows: slice::Iter<'table, SolutionRow>,
    lookups: FxHashMap<&'table Term, Option<TermId>>,
    seen: Option<FxHashSet<EncodedTriplePattern>>,
}

impl<'table> SubPatternGenerator<'table> {
    /// Creates a new generator. `base` holds the resolved constraints of `pattern`.
    pub(crate) fn new(
        dictionary: &'table dyn TermDictionary,
        pattern: &TriplePattern,
        base: EncodedTriplePattern,
        bindings: &'table BindingTable,
    ) -> Self {
        let columns = TriplePosition::ALL.map(|position| {
            pattern
                .get(position)
                .as_variable()
                .and_then(|variable| bindings.index_of(variable))
        });

        let pattern_variables = pattern.variables();
        let is_determined = pattern_variables
            .iter()
            .all(|variable| bindings.covers(variable))
            && bindings
                .variables()
                .iter()
                .all(|variable| pattern_variables.contains(&variable));

        Self {
            dictionary,
            base,
            columns,
            rows: bindings.rows().iter(),
            lookups: FxHashMap::default(),
            seen: (!is_determined).then(FxHashSet::default),
        }
    }

    /// Returns true if already yielded sub-patterns are suppressed.
    pub(crate) fn deduplicates(&self) -> bool {
        self.seen.is_some()
    }

    fn substitute(
        &mut self,
        row: &'table SolutionRow,
    ) -> Result<Option<EncodedTriplePattern>, StorageError> {
        let mut sub_pattern = self.base;
        for position in TriplePosition::ALL {
            let Some(column) = self.columns[position.spo_index()] else {
                continue;
            };
            // Unbound values keep the slot unconstrained.
            let Some(term) = row.get(column) else {
                continue;
            };

            let id = match self.lookups.get(term) {
                Some(id) => *id,
                None => {
                    let id = self.dictionary.lookup(TermRef::from(term))?;
                    self.lookups.insert(term, id);
                    id
                }
            };
            match id {
                Some(id) => sub_pattern.set(position, Some(id)),
                None => return Ok(None),
            }
        }
        Ok(Some(sub_pattern))
    }
}

impl Iterator for SubPatternGenerator<'_> {
    type Item = Result<EncodedTriplePattern, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(row) = self.rows.next() {
            let sub_pattern = match self.substitute(row) {
                Ok(Some(sub_pattern)) => sub_pattern,
                Ok(None) => {
                    tracing::trace!("Skipping row with a term unknown to the dictionary");
                    continue;
                }
                Err(error) => return Some(Err(error)),
            };

            if let Some(seen) = &mut self.seen {
                if !seen.insert(sub_pattern) {
                    continue;
                }
            }
            return Some(Ok(sub_pattern));
        }
        None
    }
}
