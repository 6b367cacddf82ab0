// Copyright 2025 Cowboy AI, LLC.

//! Transactional table store
//!
//! Named tables of JSON rows keyed by entity id. A [`Transaction`] works on a
//! snapshot taken at `begin` and records every row it inserts, updates or
//! deletes; its writes are visible to itself only until `commit` merges those
//! rows into the committed tables. Writes without a transaction are committed
//! immediately. Every write is staged on a copy of the table and applied only
//! when the whole write succeeds.
//!
//! ```mermaid
//! sequenceDiagram
//!     participant R as Repository
//!     participant T as Transaction
//!     participant S as Store
//!     R->>S: begin()
//!     S-->>T: snapshot of tables
//!     R->>T: write (staged, read-your-writes)
//!     R->>S: commit(T)
//!     S->>S: merge changed rows
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::errors::{DomainError, DomainResult};

/// Rows of one table keyed by id, in insertion order
pub type Table = IndexMap<String, Value>;

/// Environment variable naming the store
pub const STORE_NAME_ENV: &str = "CATALOG_STORE_NAME";

/// Environment variable enabling per-operation logging (`"true"`)
pub const STORE_LOGGING_ENV: &str = "CATALOG_STORE_LOGGING";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name used in log events
    pub name: String,
    /// Emit a debug event for every read and write
    pub log_operations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "catalog".to_string(),
            log_operations: false,
        }
    }
}

impl StoreConfig {
    /// Read the configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var(STORE_NAME_ENV).unwrap_or(defaults.name),
            log_operations: env::var(STORE_LOGGING_ENV)
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.log_operations),
        }
    }
}

/// Pending change of one row, relative to the transaction snapshot
#[derive(Debug, Clone, PartialEq)]
enum RowChange {
    Insert(Value),
    Update(Value),
    Delete,
}

type TableChanges = IndexMap<String, RowChange>;

#[derive(Debug)]
struct TxState {
    working: HashMap<String, Table>,
    changes: HashMap<String, TableChanges>,
    finished: bool,
}

/// Record the rows of `staged` that differ from `before`
fn record_changes(changes: &mut TableChanges, before: &Table, staged: &Table) {
    for (key, value) in staged {
        if before.get(key) == Some(value) {
            continue;
        }
        let change = match (changes.get(key), before.contains_key(key)) {
            (Some(RowChange::Insert(_)), _) | (None, false) => RowChange::Insert(value.clone()),
            _ => RowChange::Update(value.clone()),
        };
        changes.insert(key.clone(), change);
    }
    for key in before.keys().filter(|key| !staged.contains_key(*key)) {
        match changes.get(key) {
            Some(RowChange::Insert(_)) => {
                changes.shift_remove(key);
            }
            _ => {
                changes.insert(key.clone(), RowChange::Delete);
            }
        }
    }
}

/// First change of `changes` that conflicts with what `live` holds now
fn find_conflict<'a>(changes: &'a TableChanges, live: Option<&Table>) -> Option<&'a str> {
    changes.iter().find_map(|(key, change)| {
        let present = live.is_some_and(|table| table.contains_key(key));
        match change {
            RowChange::Insert(_) if present => Some(key.as_str()),
            RowChange::Update(_) | RowChange::Delete if !present => Some(key.as_str()),
            _ => None,
        }
    })
}

/// Handle of a live store transaction
///
/// Clones share the same working state.
#[derive(Clone)]
pub struct Transaction {
    id: u64,
    inner: Arc<Mutex<TxState>>,
}

impl Transaction {
    /// Transaction number, unique per store
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True once committed or rolled back
    pub async fn is_finished(&self) -> bool {
        self.inner.lock().await.finished
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction").field("id", &self.id).finish()
    }
}

/// In-process transactional store
pub struct Store {
    config: StoreConfig,
    tables: RwLock<HashMap<String, Table>>,
    next_tx: AtomicU64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    /// Create an empty store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(HashMap::new()),
            next_tx: AtomicU64::new(1),
        }
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Begin a transaction on a snapshot of every table
    pub async fn begin(&self) -> Transaction {
        let id = self.next_tx.fetch_add(1, Ordering::Relaxed);
        let working = self.tables.read().await.clone();
        info!(store = %self.config.name, tx = id, "transaction started");
        Transaction {
            id,
            inner: Arc::new(Mutex::new(TxState {
                working,
                changes: HashMap::new(),
                finished: false,
            })),
        }
    }

    /// Merge the rows written by `tx` into the committed tables
    ///
    /// Rows committed by others since `begin` are kept. The commit fails as a
    /// whole when `tx` inserted a row someone else committed meanwhile, or
    /// updated or deleted a row someone else deleted.
    pub async fn commit(&self, tx: &Transaction) -> DomainResult<()> {
        let mut state = tx.inner.lock().await;
        if state.finished {
            return Err(DomainError::TransactionClosed(tx.id));
        }
        state.finished = true;
        state.working.clear();
        let changes = std::mem::take(&mut state.changes);

        let mut tables = self.tables.write().await;
        for (name, table_changes) in &changes {
            if let Some(key) = find_conflict(table_changes, tables.get(name)) {
                warn!(store = %self.config.name, tx = tx.id, table = %name, key, "commit conflict");
                return Err(DomainError::Storage(format!(
                    "transaction {} conflicts on {name} row {key}",
                    tx.id
                )));
            }
        }

        let mut rows = 0;
        for (name, table_changes) in changes {
            let table = tables.entry(name).or_default();
            rows += table_changes.len();
            for (key, change) in table_changes {
                match change {
                    RowChange::Insert(value) | RowChange::Update(value) => {
                        table.insert(key, value);
                    }
                    RowChange::Delete => {
                        table.shift_remove(&key);
                    }
                }
            }
        }
        info!(store = %self.config.name, tx = tx.id, rows, "transaction committed");
        Ok(())
    }

    /// Discard every write made under `tx`
    pub async fn rollback(&self, tx: &Transaction) -> DomainResult<()> {
        let mut state = tx.inner.lock().await;
        if state.finished {
            return Err(DomainError::TransactionClosed(tx.id));
        }
        state.finished = true;
        state.working.clear();
        state.changes.clear();
        info!(store = %self.config.name, tx = tx.id, "transaction rolled back");
        Ok(())
    }

    /// Read `table` as seen by `tx` (or the committed state without one)
    pub async fn read<T>(
        &self,
        tx: Option<&Transaction>,
        table: &str,
        f: impl FnOnce(&Table) -> T,
    ) -> DomainResult<T> {
        self.trace("read", tx, table);
        let empty = Table::new();
        match tx {
            Some(tx) => {
                let state = tx.inner.lock().await;
                if state.finished {
                    return Err(DomainError::TransactionClosed(tx.id));
                }
                Ok(f(state.working.get(table).unwrap_or(&empty)))
            }
            None => {
                let tables = self.tables.read().await;
                Ok(f(tables.get(table).unwrap_or(&empty)))
            }
        }
    }

    /// Apply `f` to a staged copy of `table`, keeping it only on success
    pub async fn write<T>(
        &self,
        tx: Option<&Transaction>,
        table: &str,
        f: impl FnOnce(&mut Table) -> DomainResult<T>,
    ) -> DomainResult<T> {
        self.trace("write", tx, table);
        match tx {
            Some(tx) => {
                let mut state = tx.inner.lock().await;
                if state.finished {
                    return Err(DomainError::TransactionClosed(tx.id));
                }
                let before = state.working.get(table).cloned().unwrap_or_default();
                let mut staged = before.clone();
                let out = f(&mut staged)?;
                record_changes(
                    state.changes.entry(table.to_string()).or_default(),
                    &before,
                    &staged,
                );
                state.working.insert(table.to_string(), staged);
                Ok(out)
            }
            None => {
                let mut tables = self.tables.write().await;
                let mut staged = tables.get(table).cloned().unwrap_or_default();
                let out = f(&mut staged)?;
                tables.insert(table.to_string(), staged);
                Ok(out)
            }
        }
    }

    fn trace(&self, operation: &str, tx: Option<&Transaction>, table: &str) {
        if self.config.log_operations {
            debug!(
                store = %self.config.name,
                tx = tx.map(Transaction::id),
                table,
                operation,
                "store operation"
            );
        }
    }
}

/// Shared slot holding the transaction a Unit-of-Work is running
///
/// Repositories bound to a slot read it at every call, so they follow the
/// owning Unit-of-Work from auto-commit to transactional mode and back.
#[derive(Clone, Default)]
pub struct TransactionSlot(Arc<Mutex<Option<Transaction>>>);

impl TransactionSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// The current transaction, if any
    pub async fn current(&self) -> Option<Transaction> {
        self.0.lock().await.clone()
    }

    /// Put `tx` in the slot
    pub async fn set(&self, tx: Transaction) {
        *self.0.lock().await = Some(tx);
    }

    /// Take the transaction out, leaving the slot empty
    pub async fn take(&self) -> Option<Transaction> {
        self.0.lock().await.take()
    }
}

impl fmt::Debug for TransactionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransactionSlot").finish()
    }
}
