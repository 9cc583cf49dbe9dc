//! In-process `Store` realization backed by `HashMap`s.

use std::collections::HashMap;

use crate::error::Result;
use crate::store::Store;

/// An in-memory `Store`. Construction is infallible; all operations are
/// wrapped in `Result` only to satisfy the trait boundary shared with
/// `PersistentStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    frequencies: HashMap<Vec<u8>, i64>,
    deletes: HashMap<i32, Vec<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn add_delete(&mut self, fp: i32, term: &[u8]) -> Result<()> {
        let bucket = self.deletes.entry(fp).or_default();
        if !bucket.iter().any(|t| t == term) {
            bucket.push(term.to_vec());
        }
        Ok(())
    }

    fn get_terms(&self, fp: i32) -> Result<Vec<Vec<u8>>> {
        Ok(self.deletes.get(&fp).cloned().unwrap_or_default())
    }

    /// Overwrites (not accumulates) the stored frequency.
    fn set_frequency(&mut self, term: &[u8], f: i64) -> Result<()> {
        self.frequencies.insert(term.to_vec(), f);
        Ok(())
    }

    fn get_frequency(&self, term: &[u8]) -> Result<Option<i64>> {
        Ok(self.frequencies.get(term).copied())
    }

    fn begin_transaction(&mut self) -> Result<()> {
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }
}
