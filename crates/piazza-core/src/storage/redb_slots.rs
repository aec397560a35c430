//! # redb-backed Slot Storage
//!
//! A disk-backed slot store using the redb embedded database.
//!
//! One table maps slot keys to opaque payload bytes. Every save is its own
//! write transaction: mutations are persisted synchronously, one at a time,
//! matching the session's no-batching contract.

use crate::storage::SlotStore;
use crate::types::PiazzaError;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;

/// Table for slots: key string -> payload bytes.
const SLOTS: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");

/// A disk-backed slot store.
pub struct RedbSlots {
    db: Database,
}

impl std::fmt::Debug for RedbSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSlots").finish_non_exhaustive()
    }
}

impl RedbSlots {
    /// Open or create a slot database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PiazzaError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| PiazzaError::IoError(e.to_string()))?;

        // Ensure the table exists so loads before the first save succeed.
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| PiazzaError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(SLOTS)
                .map_err(|e| PiazzaError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| PiazzaError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }
}

impl SlotStore for RedbSlots {
    fn load_slot(&self, key: &str) -> Result<Option<Vec<u8>>, PiazzaError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| PiazzaError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(SLOTS)
            .map_err(|e| PiazzaError::IoError(e.to_string()))?;

        let value = table
            .get(key)
            .map_err(|e| PiazzaError::IoError(e.to_string()))?
            .map(|guard| guard.value().to_vec());

        Ok(value)
    }

    fn save_slot(&mut self, key: &str, bytes: &[u8]) -> Result<(), PiazzaError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| PiazzaError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(SLOTS)
                .map_err(|e| PiazzaError::IoError(e.to_string()))?;
            table
                .insert(key, bytes)
                .map_err(|e| PiazzaError::IoError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| PiazzaError::IoError(e.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_load_save_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("slots.redb");

        let mut slots = RedbSlots::open(&path).expect("open");
        assert_eq!(slots.load_slot("missing").expect("load"), None);

        slots.save_slot("a", &[9, 8, 7]).expect("save");
        assert_eq!(slots.load_slot("a").expect("load"), Some(vec![9, 8, 7]));
    }

    #[test]
    fn slots_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("slots.redb");

        {
            let mut slots = RedbSlots::open(&path).expect("open");
            slots.save_slot("a", &[1, 2]).expect("save");
        }

        let slots = RedbSlots::open(&path).expect("reopen");
        assert_eq!(slots.load_slot("a").expect("load"), Some(vec![1, 2]));
    }
}
