//! PostgreSQL storage backend.
//!
//! Every statement runs on a connection drawn from a shared `PgPool`.
//! Inserts into tables with allocated identifiers take
//! `pg_advisory_xact_lock(<table key>)` before computing `MAX(id) + 1`, so
//! the lock is released by the same commit or rollback that ends the insert.

mod records;
pub mod schema;
pub mod sql;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Row};
use tracing::{debug, info};

use crate::config::PostgresStorageConfig;
use crate::domain::{IdStrategy, IdTable, LockKey, Record};
use crate::error::{StorageError, StorageResult};
use crate::storage::allocator::{AllocationScope, allocate_next_id};
use crate::storage::traits::{Repository, Storage};

pub use records::{PgQuery, PgResource};

/// PostgreSQL storage implementation.
#[derive(Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Connect a pool using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn connect(config: &PostgresStorageConfig) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout))
            .connect(&config.url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create any missing clinic tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a DDL statement fails.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        schema::ensure_schema(&self.pool).await
    }
}

#[async_trait]
impl AllocationScope for PgConnection {
    async fn lock_exclusive(&mut self, key: LockKey) -> StorageResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(key.as_i64())
            .execute(&mut *self)
            .await
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        Ok(())
    }

    async fn current_max_id(&mut self, table: IdTable) -> StorageResult<Option<i64>> {
        let max = sqlx::query_scalar::<_, Option<i64>>(&sql::max_id(table.table_name()))
            .fetch_one(&mut *self)
            .await?;
        Ok(max)
    }
}

#[async_trait]
impl<R: PgResource> Repository<R> for PostgresStorage {
    async fn list(&self) -> StorageResult<Vec<Record<R>>> {
        let query = sql::select_all(R::TABLE, R::COLUMNS);
        let rows = sqlx::query_as::<_, Record<R>>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> StorageResult<Option<Record<R>>> {
        let query = sql::select_by_id(R::TABLE, R::COLUMNS);
        let row = sqlx::query_as::<_, Record<R>>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, fields: R) -> StorageResult<i64> {
        // Dropping `tx` on any early return rolls back and frees the lock.
        let mut tx = self.pool.begin().await?;

        let id = match R::ID_STRATEGY {
            IdStrategy::Allocated(table) => {
                let id = allocate_next_id(&mut *tx, table).await?;
                let query = sql::insert_with_id(R::TABLE, R::COLUMNS);
                fields
                    .bind_fields(sqlx::query(&query).bind(id))
                    .execute(&mut *tx)
                    .await?;
                id
            }
            IdStrategy::Generated => {
                let query = sql::insert_returning_id(R::TABLE, R::COLUMNS);
                let row = fields
                    .bind_fields(sqlx::query(&query))
                    .fetch_one(&mut *tx)
                    .await?;
                row.try_get::<i64, _>("id")?
            }
        };

        tx.commit().await?;
        debug!(table = R::TABLE, id, "Inserted row");
        Ok(id)
    }

    async fn update(&self, id: i64, fields: R) -> StorageResult<bool> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(&sql::lock_row(R::TABLE))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            return Ok(false);
        }

        let query = sql::update_by_id(R::TABLE, R::COLUMNS);
        fields
            .bind_fields(sqlx::query(&query))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(&sql::lock_row(R::TABLE))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            return Ok(false);
        }

        sqlx::query(&sql::delete_by_id(R::TABLE))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgresql"
    }
}
