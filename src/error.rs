//! Crate-wide error type.
//!
//! The core algorithm never fails at the API boundary (see `Index::lookup`),
//! but constructing a persistent store or talking to the underlying SQLite
//! connection can. `SymSpellError` is the single error type surfaced by those
//! fallible paths.

use thiserror::Error;

/// Errors that can be produced while constructing or driving a [`crate::store::Store`].
#[derive(Debug, Error)]
pub enum SymSpellError {
    /// A SQLite operation failed. Carries the underlying `rusqlite` error.
    #[error("storage operation failed: {source}")]
    Storage {
        #[from]
        source: rusqlite::Error,
    },

    /// Schema creation or migration failed at construction time.
    #[error("schema setup failed: {message}")]
    Schema { message: String },

    /// A rejected `IndexConfig` value.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, SymSpellError>;
