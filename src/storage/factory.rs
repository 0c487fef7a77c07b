//! Storage backend factory.
//!
//! Creates the storage backend selected by configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppError;
use crate::storage::memory::MemoryStorage;
use crate::storage::postgres::PostgresStorage;
use crate::storage::traits::{DynStorage, Storage};

/// Create a storage backend based on configuration.
///
/// The `PostgreSQL` backend creates missing tables when
/// `storage.postgresql.ensure_schema` is set.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<DynStorage>, AppError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::PostgreSQL => {
            let storage = PostgresStorage::connect(&config.postgresql).await?;

            if config.postgresql.ensure_schema {
                storage.ensure_schema().await?;
            }

            storage.health_check().await?;

            Ok(Arc::new(storage))
        }
    }
}
