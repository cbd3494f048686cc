mod term;

pub use term::EncodedTerm;
