use crate::{BlankNode, Literal, NamedNode, Term, TriplePosition, Variable};
use std::fmt::{Display, Formatter};

/// A single position of a [TriplePattern].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSlot {
    /// The slot requires the given term.
    Bound(Term),
    /// The slot is a variable that matches any term.
    Variable(Variable),
}

impl PatternSlot {
    /// Returns the variable of this slot, if any.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            PatternSlot::Variable(variable) => Some(variable),
            PatternSlot::Bound(_) => None,
        }
    }
}

impl From<Variable> for PatternSlot {
    fn from(value: Variable) -> Self {
        PatternSlot::Variable(value)
    }
}

macro_rules! impl_bound_from {
    ($t:ty) => {
        impl From<$t> for PatternSlot {
            fn from(value: $t) -> Self {
                PatternSlot::Bound(value.into())
            }
        }
    };
}

impl_bound_from!(Term);
impl_bound_from!(NamedNode);
impl_bound_from!(BlankNode);
impl_bound_from!(Literal);

impl Display for PatternSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternSlot::Bound(term) => write!(f, "{term}"),
            PatternSlot::Variable(variable) => write!(f, "{variable}"),
        }
    }
}

/// A triple pattern as requested by a client of the fragment protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: PatternSlot,
    pub predicate: PatternSlot,
    pub object: PatternSlot,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<PatternSlot>,
        predicate: impl Into<PatternSlot>,
        object: impl Into<PatternSlot>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Returns the slot at the given `position`.
    pub fn get(&self, position: TriplePosition) -> &PatternSlot {
        match position {
            TriplePosition::Subject => &self.subject,
            TriplePosition::Predicate => &self.predicate,
            TriplePosition::Object => &self.object,
        }
    }

    /// Iterates over the slots in subject, predicate, object order.
    pub fn slots(&self) -> impl Iterator<Item = (TriplePosition, &PatternSlot)> {
        TriplePosition::ALL
            .into_iter()
            .map(|position| (position, self.get(position)))
    }

    /// Returns the distinct variables of this pattern in slot order.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut result: Vec<&Variable> = Vec::with_capacity(3);
        for (_, slot) in self.slots() {
            if let Some(variable) = slot.as_variable() {
                if !result.contains(&variable) {
                    result.push(variable);
                }
            }
        }
        result
    }

    /// Returns the positions that hold the given `variable`.
    pub fn positions_of(&self, variable: &Variable) -> Vec<TriplePosition> {
        self.slots()
            .filter(|(_, slot)| slot.as_variable() == Some(variable))
            .map(|(position, _)| position)
            .collect()
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
