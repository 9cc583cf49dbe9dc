//! Relational (SQLite) `Store` realization.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, warn};

use crate::error::{Result, SymSpellError};
use crate::store::Store;

const SCHEMA_V1: &str = "
PRAGMA foreign_keys = ON;
CREATE TABLE IF NOT EXISTS terms (
    id INTEGER PRIMARY KEY,
    term BLOB UNIQUE NOT NULL,
    frequency INTEGER NOT NULL DEFAULT 1
);
CREATE TABLE IF NOT EXISTS deletes (
    delete_hash INTEGER NOT NULL,
    term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
    PRIMARY KEY (delete_hash, term_id)
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_terms_term ON terms(term);
CREATE INDEX IF NOT EXISTS idx_deletes_hash ON deletes(delete_hash);
";

/// A `Store` backed by a SQLite connection.
///
/// Takes ownership of an already-opened `rusqlite::Connection`; it does not
/// know or care whether that connection points at a file or
/// `:memory:`. Prepared statements are obtained via `prepare_cached` so the
/// underlying SQL is compiled once per connection and reused thereafter.
pub struct PersistentStore {
    conn: Connection,
    in_transaction: bool,
}

impl PersistentStore {
    /// Opens the schema (idempotently) against `conn` and returns a ready
    /// `Store`. Fails if the schema cannot be created.
    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_V1).map_err(|e| {
            warn!(error = %e, "failed to create symspellrs schema");
            SymSpellError::Schema {
                message: e.to_string(),
            }
        })?;
        info!("symspellrs schema ready");
        Ok(Self {
            conn,
            in_transaction: false,
        })
    }

    /// Returns the maximum stored term length in bytes, or 0 if the table
    /// is empty. Used by callers that want to recompute
    /// `maxDictionaryWordLength` after reopening an existing dictionary
    /// (see DESIGN.md / SPEC_FULL.md §9).
    pub fn max_term_length(&self) -> Result<usize> {
        // MAX() over an empty table yields one row with a NULL value, not
        // zero rows, so this always succeeds and only the NULL needs
        // handling (empty dictionary -> 0).
        let len: Option<i64> = self.conn.query_row(
            "SELECT MAX(LENGTH(term)) FROM terms",
            [],
            |row| row.get(0),
        )?;
        Ok(len.unwrap_or(0).max(0) as usize)
    }
}

impl Store for PersistentStore {
    fn add_delete(&mut self, fp: i32, term: &[u8]) -> Result<()> {
        let term_id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM terms WHERE term = ?1",
                params![term],
                |row| row.get(0),
            )
            .optional()?;
        let Some(term_id) = term_id else {
            // The term must already be posted via set_frequency before any
            // delete-variant can reference it; if it isn't, there is
            // nothing to link and we degrade silently (§7).
            warn!(fp, term_len = term.len(), "add_delete: unknown term, skipping");
            return Ok(());
        };
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO deletes (delete_hash, term_id) VALUES (?1, ?2)",
        )?;
        stmt.execute(params![fp as i64, term_id])?;
        Ok(())
    }

    fn get_terms(&self, fp: i32) -> Result<Vec<Vec<u8>>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT t.term FROM deletes d JOIN terms t ON t.id = d.term_id WHERE d.delete_hash = ?1",
        )?;
        let rows = stmt.query_map(params![fp as i64], |row| row.get::<_, Vec<u8>>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Overwrites the stored frequency with `f`, or inserts a new row with
    /// frequency `f` if the term is new. Matches `MemoryStore`: `Index`
    /// already computes the saturated total before calling this, so the
    /// store itself never needs to add.
    fn set_frequency(&mut self, term: &[u8], f: i64) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO terms (term, frequency) VALUES (?1, ?2)
             ON CONFLICT(term) DO UPDATE SET frequency = excluded.frequency",
        )?;
        stmt.execute(params![term, f])?;
        Ok(())
    }

    fn get_frequency(&self, term: &[u8]) -> Result<Option<i64>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT frequency FROM terms WHERE term = ?1")?;
        let freq = stmt
            .query_row(params![term], |row| row.get(0))
            .optional()?;
        Ok(freq)
    }

    fn begin_transaction(&mut self) -> Result<()> {
        if self.in_transaction {
            return Ok(());
        }
        self.conn.execute_batch("BEGIN")?;
        self.in_transaction = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }
        match self.conn.execute_batch("COMMIT") {
            Ok(()) => {
                self.in_transaction = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "commit failed, rolling back");
                self.in_transaction = false;
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(SymSpellError::Storage { source: e })
            }
        }
    }

    fn rollback(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }
        self.conn.execute_batch("ROLLBACK")?;
        self.in_transaction = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> PersistentStore {
        PersistentStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn set_frequency_overwrites() {
        let mut s = open();
        s.set_frequency(b"cat", 5).unwrap();
        s.set_frequency(b"cat", 9).unwrap();
        assert_eq!(s.get_frequency(b"cat").unwrap(), Some(9));
    }

    #[test]
    fn add_delete_requires_existing_term() {
        let mut s = open();
        // No term row yet: silently skipped, not an error.
        s.add_delete(1, b"ca").unwrap();
        assert!(s.get_terms(1).unwrap().is_empty());
    }

    #[test]
    fn add_delete_links_after_set_frequency() {
        let mut s = open();
        s.set_frequency(b"cat", 1).unwrap();
        s.add_delete(42, b"cat").unwrap();
        assert_eq!(s.get_terms(42).unwrap(), vec![b"cat".to_vec()]);
    }

    #[test]
    fn add_delete_is_idempotent() {
        let mut s = open();
        s.set_frequency(b"cat", 1).unwrap();
        s.add_delete(42, b"cat").unwrap();
        s.add_delete(42, b"cat").unwrap();
        assert_eq!(s.get_terms(42).unwrap().len(), 1);
    }

    #[test]
    fn transactions_commit_and_rollback() {
        let mut s = open();
        s.begin_transaction().unwrap();
        s.set_frequency(b"cat", 1).unwrap();
        s.rollback().unwrap();
        assert_eq!(s.get_frequency(b"cat").unwrap(), None);

        s.begin_transaction().unwrap();
        s.set_frequency(b"dog", 1).unwrap();
        s.commit().unwrap();
        assert_eq!(s.get_frequency(b"dog").unwrap(), Some(1));
    }

    #[test]
    fn nested_begin_is_idempotent() {
        let mut s = open();
        s.begin_transaction().unwrap();
        s.begin_transaction().unwrap();
        s.set_frequency(b"cat", 1).unwrap();
        s.commit().unwrap();
        assert_eq!(s.get_frequency(b"cat").unwrap(), Some(1));
    }

    #[test]
    fn max_term_length_reflects_stored_terms() {
        let mut s = open();
        assert_eq!(s.max_term_length().unwrap(), 0);
        s.set_frequency(b"hello", 1).unwrap();
        s.set_frequency(b"hi", 1).unwrap();
        assert_eq!(s.max_term_length().unwrap(), 5);
    }

    #[test]
    fn non_utf8_terms_round_trip() {
        let mut s = open();
        let raw: &[u8] = &[0xff, 0x00, 0xfe];
        s.set_frequency(raw, 3).unwrap();
        assert_eq!(s.get_frequency(raw).unwrap(), Some(3));
    }
}
