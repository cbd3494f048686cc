//! Contains the interfaces that a triple store has to implement to be served by the fragment
//! engine.
//!
//! A store consists of a [TermDictionary] that maps RDF terms to [TermId](ldf_model::TermId)s
//! and a [TripleSource] that can be searched with an
//! [EncodedTriplePattern](ldf_model::EncodedTriplePattern). A search returns a [MatchCursor] that
//! lazily produces the matching triples.

mod cursor;
mod dictionary;
mod triple_source;

pub use cursor::{MatchCursor, SeekError};
pub use dictionary::TermDictionary;
pub use triple_source::TripleSource;
