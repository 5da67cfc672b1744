//! redb-backed store handle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use redb::{Database, ReadableTable, TableDefinition, TableError};
use thiserror::Error;

use crate::routing::PathEntry;

/// Default store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "paths.db";

/// Default name of the single logical collection.
pub const DEFAULT_TABLE: &str = "root";

/// Errors from the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be opened or initialized.
    #[error("Store unavailable at {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: redb::Error,
    },

    /// The collection is gone from an opened store.
    #[error("Store table '{table}' not found")]
    MissingRoot { table: String },

    /// A transaction or read failed.
    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the path store.
///
/// Clones share one open database. The file is released when the last clone
/// is dropped; [`PathStore::close`] is the explicit end of the owner's handle.
#[derive(Clone)]
pub struct PathStore {
    db: Arc<Database>,
    table: Arc<str>,
    path: PathBuf,
}

impl PathStore {
    /// Create or attach to the store at `path`, creating `table` if absent.
    pub fn open(path: impl AsRef<Path>, table: &str) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let started_at = Instant::now();

        let unavailable = |source: redb::Error| StoreError::Unavailable {
            path: path.clone(),
            source,
        };

        let db = Database::create(&path).map_err(|e| unavailable(e.into()))?;

        let store = Self {
            db: Arc::new(db),
            table: Arc::from(table),
            path: path.clone(),
        };
        store.ensure_table().map_err(unavailable)?;

        tracing::info!(
            path = %path.display(),
            table = %store.table,
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Store opened"
        );

        Ok(store)
    }

    fn definition(&self) -> TableDefinition<'_, &'static str, &'static str> {
        TableDefinition::new(self.table.as_ref())
    }

    fn ensure_table(&self) -> Result<(), redb::Error> {
        let txn = self.db.begin_write()?;
        txn.open_table(self.definition())?;
        txn.commit()?;
        Ok(())
    }

    /// Upsert baseline entries in a single write transaction.
    ///
    /// Re-running with the same entries leaves the store unchanged.
    pub fn seed(&self, entries: &[PathEntry]) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(self.definition()).map_err(redb::Error::from)?;
            for entry in entries {
                table
                    .insert(entry.path.as_str(), entry.url.as_str())
                    .map_err(redb::Error::from)?;
            }
        }
        txn.commit().map_err(redb::Error::from)?;

        tracing::info!(table = %self.table, entries = entries.len(), "Store seeded");
        Ok(())
    }

    /// Point lookup inside a read transaction.
    ///
    /// An absent key is `Ok(None)`. A missing table is reported as
    /// [`StoreError::MissingRoot`].
    pub fn get(&self, path: &str) -> StoreResult<Option<String>> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match txn.open_table(self.definition()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StoreError::MissingRoot {
                    table: self.table.to_string(),
                })
            }
            Err(e) => return Err(StoreError::Storage(e.into())),
        };

        let value = table.get(path).map_err(redb::Error::from)?;
        Ok(value.map(|guard| guard.value().to_owned()))
    }

    /// All entries in key order.
    pub fn entries(&self) -> StoreResult<Vec<PathEntry>> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match txn.open_table(self.definition()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StoreError::MissingRoot {
                    table: self.table.to_string(),
                })
            }
            Err(e) => return Err(StoreError::Storage(e.into())),
        };

        let mut entries = Vec::new();
        for item in table.iter().map_err(redb::Error::from)? {
            let (key, value) = item.map_err(redb::Error::from)?;
            entries.push(PathEntry::new(key.value(), value.value()));
        }
        Ok(entries)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// A handle over a fresh database whose table was never created.
    #[cfg(test)]
    pub(crate) fn without_table(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path).expect("create bare database");
        Self {
            db: Arc::new(db),
            table: Arc::from(DEFAULT_TABLE),
            path,
        }
    }

    /// Release the owner's handle.
    pub fn close(self) {
        let outstanding = Arc::strong_count(&self.db) - 1;
        if outstanding > 0 {
            tracing::warn!(
                path = %self.path.display(),
                outstanding,
                "Store closed while other handles are alive; file stays open until they drop"
            );
        }
        drop(self);
        tracing::info!("Store closed");
    }
}

impl fmt::Debug for PathStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathStore")
            .field("path", &self.path)
            .field("table", &self.table)
            .finish()
    }
}
