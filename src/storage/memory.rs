//! In-memory storage backend.
//!
//! Rows live in process memory as JSON values. Allocated identifiers follow
//! the same protocol as the PostgreSQL backend, with a per-key async mutex
//! standing in for the advisory lock: a [`MemoryTransaction`] keeps the
//! owned guard until it commits, rolls back or is dropped.
//!
//! Suitable for development and tests; nothing survives a restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::{IdStrategy, IdTable, LockKey, Record, Resource};
use crate::error::{StorageError, StorageResult};
use crate::storage::allocator::{AllocationScope, allocate_next_id};
use crate::storage::traits::{Repository, Storage};

#[derive(Default)]
struct MemoryTable {
    rows: BTreeMap<i64, Value>,
    /// Last value handed out for generated ids; never rewinds.
    last_generated: i64,
}

#[derive(Default)]
struct Inner {
    tables: Mutex<HashMap<&'static str, MemoryTable>>,
    locks: DashMap<LockKey, Arc<AsyncMutex<()>>>,
}

/// In-memory storage implementation.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction.
    #[must_use]
    pub fn begin(&self) -> MemoryTransaction {
        MemoryTransaction {
            inner: Arc::clone(&self.inner),
            held: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Insert a row with an explicit id, bypassing the table's lock.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Constraint`] if the id is already taken.
    pub fn insert_with_id<R: Resource>(&self, id: i64, fields: &R) -> StorageResult<()> {
        let row = serde_json::to_value(fields)?;
        let mut tables = self.inner.tables.lock();
        insert_row(tables.entry(R::TABLE).or_default(), R::TABLE, id, row)
    }
}

fn insert_row(table: &mut MemoryTable, name: &str, id: i64, row: Value) -> StorageResult<()> {
    if table.rows.contains_key(&id) {
        return Err(StorageError::Constraint(format!(
            "duplicate key value violates primary key of {name}: id={id}"
        )));
    }
    table.rows.insert(id, row);
    Ok(())
}

fn decode<R: Resource>(id: i64, row: &Value) -> StorageResult<Record<R>> {
    Ok(Record::new(id, R::deserialize(row)?))
}

struct StagedInsert {
    table: &'static str,
    id: i64,
    row: Value,
}

/// A unit of work against [`MemoryStorage`].
///
/// Staged inserts become visible on [`commit`](Self::commit). Locks taken
/// through [`AllocationScope::lock_exclusive`] are held until the
/// transaction is committed, rolled back or dropped.
pub struct MemoryTransaction {
    inner: Arc<Inner>,
    held: Vec<OwnedMutexGuard<()>>,
    staged: Vec<StagedInsert>,
}

impl MemoryTransaction {
    /// Stage an insert of `fields` under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields cannot be serialized.
    pub fn insert<R: Resource>(&mut self, id: i64, fields: &R) -> StorageResult<()> {
        self.staged.push(StagedInsert {
            table: R::TABLE,
            id,
            row: serde_json::to_value(fields)?,
        });
        Ok(())
    }

    /// Apply staged inserts atomically and release held locks.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Constraint`] if any staged id is already
    /// present; nothing is applied in that case.
    pub fn commit(self) -> StorageResult<()> {
        let mut tables = self.inner.tables.lock();
        for staged in &self.staged {
            let taken = tables
                .get(staged.table)
                .is_some_and(|t| t.rows.contains_key(&staged.id));
            if taken {
                return Err(StorageError::Constraint(format!(
                    "duplicate key value violates primary key of {}: id={}",
                    staged.table, staged.id
                )));
            }
        }
        for staged in self.staged {
            let table = tables.entry(staged.table).or_default();
            insert_row(table, staged.table, staged.id, staged.row)?;
        }
        Ok(())
    }

    /// Discard staged inserts and release held locks.
    pub fn rollback(self) {}
}

#[async_trait]
impl AllocationScope for MemoryTransaction {
    async fn lock_exclusive(&mut self, key: LockKey) -> StorageResult<()> {
        let lock = Arc::clone(self.inner.locks.entry(key).or_default().value());
        self.held.push(lock.lock_owned().await);
        Ok(())
    }

    async fn current_max_id(&mut self, table: IdTable) -> StorageResult<Option<i64>> {
        let tables = self.inner.tables.lock();
        Ok(tables
            .get(table.table_name())
            .and_then(|t| t.rows.keys().next_back().copied()))
    }
}

#[async_trait]
impl<R: Resource> Repository<R> for MemoryStorage {
    async fn list(&self) -> StorageResult<Vec<Record<R>>> {
        let tables = self.inner.tables.lock();
        tables.get(R::TABLE).map_or_else(
            || Ok(Vec::new()),
            |t| t.rows.iter().map(|(id, row)| decode(*id, row)).collect(),
        )
    }

    async fn get(&self, id: i64) -> StorageResult<Option<Record<R>>> {
        let tables = self.inner.tables.lock();
        tables
            .get(R::TABLE)
            .and_then(|t| t.rows.get(&id))
            .map(|row| decode(id, row))
            .transpose()
    }

    async fn create(&self, fields: R) -> StorageResult<i64> {
        match R::ID_STRATEGY {
            IdStrategy::Allocated(table) => {
                let mut tx = self.begin();
                let id = allocate_next_id(&mut tx, table).await?;
                tx.insert(id, &fields)?;
                tx.commit()?;
                Ok(id)
            }
            IdStrategy::Generated => {
                let row = serde_json::to_value(&fields)?;
                let mut tables = self.inner.tables.lock();
                let table = tables.entry(R::TABLE).or_default();
                let id = table
                    .last_generated
                    .checked_add(1)
                    .ok_or(StorageError::IdSpaceExhausted(R::TABLE))?;
                table.last_generated = id;
                insert_row(table, R::TABLE, id, row)?;
                debug!(table = R::TABLE, id, "Inserted row with generated id");
                Ok(id)
            }
        }
    }

    async fn update(&self, id: i64, fields: R) -> StorageResult<bool> {
        let row = serde_json::to_value(&fields)?;
        let mut tables = self.inner.tables.lock();
        match tables.get_mut(R::TABLE).and_then(|t| t.rows.get_mut(&id)) {
            Some(existing) => {
                *existing = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let mut tables = self.inner.tables.lock();
        Ok(tables
            .get_mut(R::TABLE)
            .is_some_and(|t| t.rows.remove(&id).is_some()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
