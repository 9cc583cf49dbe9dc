//! symspellrs - a SymSpell fuzzy matching and spelling-correction index.
//!
//! Given a dictionary of terms with associated frequencies, [`Index::lookup`]
//! answers, for any query string, the set of dictionary terms reachable
//! within a configured maximum edit distance, ranked by (distance ascending,
//! frequency descending).
//!
//! The index is generic over a [`store::Store`] implementation: the same
//! algorithm runs unmodified against an in-process [`store::MemoryStore`]
//! or a SQLite-backed [`store::PersistentStore`].
//!
//! ```
//! use symspellrs::{Index, MemoryStore, Verbosity};
//!
//! let mut index = Index::new(MemoryStore::new()).unwrap();
//! index.insert(b"hello", 1000);
//! index.insert(b"world", 500);
//!
//! let suggestions = index.lookup(b"hellp", Verbosity::Closest, -1);
//! assert_eq!(suggestions[0].term, b"hello");
//! ```

pub mod config;
pub mod deletes;
pub mod distance;
pub mod error;
pub mod fingerprint;
pub mod index;
pub mod store;
pub mod suggestion;

pub use config::IndexConfig;
pub use distance::distance;
pub use error::{Result, SymSpellError};
pub use fingerprint::fingerprint;
pub use index::Index;
pub use store::{MemoryStore, PersistentStore, Store};
pub use suggestion::{Suggestion, Verbosity};
