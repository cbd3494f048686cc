use ldf_model::{
    CorruptionError, EncodedTriple, StorageError, Subject, Term, TermId, TermRef, Triple,
    TriplePosition,
};

/// A bidirectional mapping between RDF terms and the [TermId]s of a single store.
pub trait TermDictionary: Send + Sync {
    /// Returns the id of `term`, or [None] if the store has never seen the term.
    fn lookup(&self, term: TermRef<'_>) -> Result<Option<TermId>, StorageError>;

    /// Returns the term identified by `id`.
    ///
    /// Ids obtained from the store itself must always be resolvable. An unknown id indicates a
    /// corrupted store.
    fn materialize(&self, id: TermId) -> Result<Term, StorageError>;

    /// Materializes all three terms of `triple`.
    fn materialize_triple(&self, triple: &EncodedTriple) -> Result<Triple, StorageError> {
        let subject = match self.materialize(triple.subject)? {
            Term::NamedNode(nn) => Subject::NamedNode(nn),
            Term::BlankNode(bnode) => Subject::BlankNode(bnode),
            Term::Literal(_) => {
                return Err(CorruptionError::MisplacedTerm {
                    id: triple.subject,
                    position: TriplePosition::Subject,
                }
                .into());
            }
        };
        let predicate = match self.materialize(triple.predicate)? {
            Term::NamedNode(nn) => nn,
            Term::BlankNode(_) | Term::Literal(_) => {
                return Err(CorruptionError::MisplacedTerm {
                    id: triple.predicate,
                    position: TriplePosition::Predicate,
                }
                .into());
            }
        };
        let object = self.materialize(triple.object)?;
        Ok(Triple::new(subject, predicate, object))
    }
}
