use crate::{Term, Variable};
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// A partial mapping from the variables of a [BindingTable] to terms.
///
/// The row holds one entry per declared variable of its table. `None` marks a variable that is not
/// bound by this row (`UNDEF` in SPARQL `VALUES`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolutionRow(Vec<Option<Term>>);

impl SolutionRow {
    pub fn new(values: Vec<Option<Term>>) -> Self {
        Self(values)
    }

    /// Returns the value at `index`, or [None] if the variable is unbound.
    pub fn get(&self, index: usize) -> Option<&Term> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Option<Term>] {
        &self.0
    }
}

impl From<Vec<Option<Term>>> for SolutionRow {
    fn from(value: Vec<Option<Term>>) -> Self {
        Self::new(value)
    }
}

/// An error raised when a [BindingTable] is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingTableError {
    #[error("Variable {0} is declared more than once")]
    DuplicateVariable(Variable),
    #[error("Row {row} has {actual} values but {expected} variables are declared")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A table of solution rows over a declared set of variables, analogous to a SPARQL `VALUES`
/// clause.
///
/// Rows that occur more than once are only kept once, in the order of their first occurrence. A
/// duplicated row restricts a fragment in exactly the same way as a single one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingTable {
    variables: Vec<Variable>,
    rows: Vec<SolutionRow>,
}

impl BindingTable {
    /// Creates a new [BindingTable].
    ///
    /// Returns an error if a variable is declared twice or if a row does not have one value per
    /// declared variable.
    pub fn try_new(
        variables: Vec<Variable>,
        rows: impl IntoIterator<Item = SolutionRow>,
    ) -> Result<Self, BindingTableError> {
        let mut declared = FxHashSet::default();
        for variable in &variables {
            if !declared.insert(variable) {
                return Err(BindingTableError::DuplicateVariable(variable.clone()));
            }
        }

        let mut seen = FxHashSet::default();
        let mut distinct_rows = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != variables.len() {
                return Err(BindingTableError::RowArity {
                    row: index,
                    expected: variables.len(),
                    actual: row.len(),
                });
            }

            if seen.insert(row.clone()) {
                distinct_rows.push(row);
            }
        }

        Ok(Self {
            variables,
            rows: distinct_rows,
        })
    }

    /// Returns the declared ("covered") variables.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn rows(&self) -> &[SolutionRow] {
        &self.rows
    }

    /// Returns the number of distinct rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the column index of `variable`, if it is declared.
    pub fn index_of(&self, variable: &Variable) -> Option<usize> {
        self.variables.iter().position(|v| v == variable)
    }

    /// Returns true if `variable` is declared by this table.
    pub fn covers(&self, variable: &Variable) -> bool {
        self.index_of(variable).is_some()
    }

    /// Computes a stable fingerprint of the table that can be used as part of a cache key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
