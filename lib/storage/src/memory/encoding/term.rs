use ldf_model::{BlankNodeRef, LiteralRef, NamedNodeRef, TermRef};
use std::sync::Arc;

/// A term whose strings are interned by the [MemTermDictionary](crate::memory::MemTermDictionary).
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum EncodedTerm {
    NamedNode(Arc<str>),
    BlankNode(Arc<str>),
    Literal {
        value: Arc<str>,
        annotation: LiteralAnnotation,
    },
}

/// Distinguishes typed literals from language-tagged strings.
///
/// Simple literals are typed literals with the `xsd:string` datatype.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum LiteralAnnotation {
    Datatype(Arc<str>),
    Language(Arc<str>),
}

impl EncodedTerm {
    /// Encodes `term`, resolving each of its strings with `intern`.
    ///
    /// Stops at the first string that `intern` fails to provide.
    pub fn encode<TError>(
        term: TermRef<'_>,
        mut intern: impl FnMut(&str) -> Result<Arc<str>, TError>,
    ) -> Result<Self, TError> {
        Ok(match term {
            TermRef::NamedNode(nn) => Self::NamedNode(intern(nn.as_str())?),
            TermRef::BlankNode(bnode) => Self::BlankNode(intern(bnode.as_str())?),
            TermRef::Literal(literal) => {
                let value = intern(literal.value())?;
                let annotation = match literal.language() {
                    Some(language) => LiteralAnnotation::Language(intern(language)?),
                    None => LiteralAnnotation::Datatype(intern(literal.datatype().as_str())?),
                };
                Self::Literal { value, annotation }
            }
        })
    }

    /// Returns a borrowed RDF term with the same content.
    pub fn as_term_ref(&self) -> TermRef<'_> {
        match self {
            Self::NamedNode(iri) => NamedNodeRef::new_unchecked(iri).into(),
            Self::BlankNode(id) => BlankNodeRef::new_unchecked(id).into(),
            Self::Literal {
                value,
                annotation: LiteralAnnotation::Datatype(datatype),
            } => LiteralRef::new_typed_literal(value, NamedNodeRef::new_unchecked(datatype)).into(),
            Self::Literal {
                value,
                annotation: LiteralAnnotation::Language(language),
            } => LiteralRef::new_language_tagged_literal_unchecked(value, language).into(),
        }
    }
}
