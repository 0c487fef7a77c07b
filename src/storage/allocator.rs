//! Sequential identifier allocation.
//!
//! An identifier is allocated inside the transaction that inserts the row:
//!
//! 1. take the table's exclusive, transaction-scoped lock;
//! 2. read the current maximum id and add one;
//! 3. the caller inserts with that id and commits (or rolls back).
//!
//! The lock is held until the transaction ends, so every writer that goes
//! through [`allocate_next_id`] for the same table sees the maximum left by
//! the previous committed writer. Reads, updates and deletes never take it.

use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{IdTable, LockKey};
use crate::error::{StorageError, StorageResult};

/// A transaction in which an identifier can be allocated.
///
/// The lock taken by [`lock_exclusive`](Self::lock_exclusive) must be
/// released only when the transaction commits or rolls back.
#[async_trait]
pub trait AllocationScope: Send {
    /// Block until the exclusive lock for `key` is held by this transaction.
    async fn lock_exclusive(&mut self, key: LockKey) -> StorageResult<()>;

    /// Largest committed identifier in `table`, `None` when empty.
    async fn current_max_id(&mut self, table: IdTable) -> StorageResult<Option<i64>>;
}

/// Allocate the next identifier for `table` within `scope`.
///
/// # Errors
///
/// Returns an error if the lock cannot be acquired, the maximum cannot be
/// read, or the table already holds `i64::MAX`. The caller must roll the
/// transaction back on any error.
pub async fn allocate_next_id<S>(scope: &mut S, table: IdTable) -> StorageResult<i64>
where
    S: AllocationScope + ?Sized,
{
    let started = Instant::now();
    scope.lock_exclusive(table.lock_key()).await?;
    let waited = started.elapsed();

    let max = scope.current_max_id(table).await?;
    let id = next_candidate(max).ok_or(StorageError::IdSpaceExhausted(table.table_name()))?;

    metrics::histogram!("vetclinic_id_allocation_seconds", "table" => table.table_name())
        .record(started.elapsed().as_secs_f64());
    debug!(
        table = table.table_name(),
        lock_key = %table.lock_key(),
        waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
        id,
        "Allocated identifier"
    );

    Ok(id)
}

/// Candidate identifier following `max`.
///
/// An empty table, or one holding only non-positive ids, starts at 1.
#[must_use]
pub const fn next_candidate(max: Option<i64>) -> Option<i64> {
    match max {
        Some(max) if max > 0 => max.checked_add(1),
        _ => Some(1),
    }
}
