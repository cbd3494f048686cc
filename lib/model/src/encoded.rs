use crate::TermId;
use std::fmt::{Display, Formatter};

/// Identifies one of the three positions of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriplePosition {
    Subject,
    Predicate,
    Object,
}

impl TriplePosition {
    /// All positions in subject, predicate, object order.
    pub const ALL: [TriplePosition; 3] = [
        TriplePosition::Subject,
        TriplePosition::Predicate,
        TriplePosition::Object,
    ];

    /// Returns the index of the position in an SPO ordering.
    pub fn spo_index(self) -> usize {
        match self {
            TriplePosition::Subject => 0,
            TriplePosition::Predicate => 1,
            TriplePosition::Object => 2,
        }
    }
}

impl Display for TriplePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TriplePosition::Subject => write!(f, "S"),
            TriplePosition::Predicate => write!(f, "P"),
            TriplePosition::Object => write!(f, "O"),
        }
    }
}

/// A triple whose terms are replaced by their dictionary ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedTriple {
    pub subject: TermId,
    pub predicate: TermId,
    pub object: TermId,
}

impl EncodedTriple {
    pub fn new(subject: TermId, predicate: TermId, object: TermId) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Returns the id at the given `position`.
    pub fn get(&self, position: TriplePosition) -> TermId {
        match position {
            TriplePosition::Subject => self.subject,
            TriplePosition::Predicate => self.predicate,
            TriplePosition::Object => self.object,
        }
    }

    /// Returns the ids in SPO order.
    pub fn as_array(&self) -> [TermId; 3] {
        [self.subject, self.predicate, self.object]
    }

    /// Creates a triple from ids in SPO order.
    pub fn from_array([subject, predicate, object]: [TermId; 3]) -> Self {
        Self::new(subject, predicate, object)
    }
}

/// The store-level constraints of a triple pattern.
///
/// Each slot either holds the id of the required term or `None`, which matches every term in that
/// position. Variables cannot be distinguished from unconstrained slots at this level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedTriplePattern {
    pub subject: Option<TermId>,
    pub predicate: Option<TermId>,
    pub object: Option<TermId>,
}

impl EncodedTriplePattern {
    /// The pattern that matches every triple.
    pub const ANY: EncodedTriplePattern = EncodedTriplePattern {
        subject: None,
        predicate: None,
        object: None,
    };

    pub fn new(
        subject: Option<TermId>,
        predicate: Option<TermId>,
        object: Option<TermId>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Returns the constraint at the given `position`.
    pub fn get(&self, position: TriplePosition) -> Option<TermId> {
        match position {
            TriplePosition::Subject => self.subject,
            TriplePosition::Predicate => self.predicate,
            TriplePosition::Object => self.object,
        }
    }

    /// Replaces the constraint at the given `position`.
    pub fn set(&mut self, position: TriplePosition, value: Option<TermId>) {
        match position {
            TriplePosition::Subject => self.subject = value,
            TriplePosition::Predicate => self.predicate = value,
            TriplePosition::Object => self.object = value,
        }
    }

    /// Returns the number of bound slots.
    pub fn bound_count(&self) -> usize {
        [self.subject, self.predicate, self.object]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Returns true if `triple` satisfies every bound slot of this pattern.
    pub fn matches(&self, triple: &EncodedTriple) -> bool {
        TriplePosition::ALL.iter().all(|position| {
            self.get(*position)
                .map_or(true, |expected| expected == triple.get(*position))
        })
    }
}

impl Display for EncodedTriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for position in TriplePosition::ALL {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match self.get(position) {
                None => write!(f, "*")?,
                Some(id) => write!(f, "{id}")?,
            }
        }
        Ok(())
    }
}
