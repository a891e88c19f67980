//! Durable client-local cart persistence
//!
//! One table, one key: every write serializes the full line list and
//! replaces it inside a single transaction, so the stored cart is always a
//! complete list, never a partial patch. redb commits are atomic against
//! crashes and power loss, which is the whole point of using it here - a
//! half-written cart would make the recomputed total lie on reload.
//!
//! The stored format is [`PersistedLine`] only: product id, selections,
//! quantity. Prices and the total are deliberately absent and rebuilt
//! against the current catalog on rehydration.

use std::path::Path;
use std::sync::Mutex;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::cart::PersistedLine;
use thiserror::Error;

/// Table for the cart: key = "lines", value = JSON-serialized Vec<PersistedLine>
const CART_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cart");

const LINES_KEY: &str = "lines";

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable cart storage
pub trait CartStore {
    /// Replace the stored line list atomically
    fn save(&self, lines: &[PersistedLine]) -> StoreResult<()>;

    /// Load the stored line list (empty for a fresh store)
    fn load(&self) -> StoreResult<Vec<PersistedLine>>;
}

/// Cart storage backed by redb
pub struct RedbCartStore {
    db: Database,
}

impl RedbCartStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        // Ensure the table exists so a fresh store loads as empty
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl CartStore for RedbCartStore {
    fn save(&self, lines: &[PersistedLine]) -> StoreResult<()> {
        let bytes = serde_json::to_vec(lines)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            table.insert(LINES_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<PersistedLine>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;
        match table.get(LINES_KEY)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(Vec::new()),
        }
    }
}

/// In-memory cart storage (tests, ephemeral sessions)
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    lines: Mutex<Vec<PersistedLine>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn save(&self, lines: &[PersistedLine]) -> StoreResult<()> {
        *self
            .lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = lines.to_vec();
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<PersistedLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: u32) -> PersistedLine {
        PersistedLine {
            product_id: product_id.to_string(),
            variants: Default::default(),
            addons: Default::default(),
            quantity,
        }
    }

    #[test]
    fn fresh_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbCartStore::open(dir.path().join("cart.redb")).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_the_whole_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbCartStore::open(dir.path().join("cart.redb")).unwrap();

        store.save(&[line("a", 1), line("b", 2)]).unwrap();
        assert_eq!(store.load().unwrap().len(), 2);

        // A later save with fewer lines must not leave stale entries behind
        store.save(&[line("b", 5)]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![line("b", 5)]);
    }

    #[test]
    fn cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.redb");

        {
            let store = RedbCartStore::open(&path).unwrap();
            store.save(&[line("a", 3)]).unwrap();
        }

        let store = RedbCartStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), vec![line("a", 3)]);
    }
}
