#![doc(test(attr(deny(warnings))))]

//! Contains the data model shared by the crates of the Linked Data Fragments engine.
//!
//! RDF terms are taken from [oxrdf]. On top of them, this crate defines the dictionary-encoded
//! representation used by the storage layer ([TermId], [EncodedTriple], [EncodedTriplePattern]),
//! the user-facing [TriplePattern] and the [BindingTable] of a binding-restricted request.

mod bindings;
mod encoded;
mod error;
mod pattern;
mod term_id;

pub use bindings::*;
pub use encoded::*;
pub use error::*;
pub use pattern::*;
pub use term_id::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    Subject, SubjectRef, Term, TermParseError, TermRef, Triple, TripleRef, Variable,
    VariableNameParseError, VariableRef,
};
