//! A read-only, in-memory triple store.
//!
//! The store is filled once through a [MemTripleStoreBuilder] and then frozen into a
//! [MemTripleStore]. Frozen stores are immutable and can be searched concurrently.
mod cursor;
mod dictionary;
mod encoding;
mod sorted_index;
mod store;

pub use cursor::{ScanCursor, SliceCursor};
pub use dictionary::MemTermDictionary;
pub use sorted_index::SortedTripleIndex;
pub use store::{MemTripleStore, MemTripleStoreBuilder};
