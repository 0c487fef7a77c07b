//! Storage trait definitions.
//!
//! These traits define the interface for storage backends, enabling swapping
//! between different implementations without changing business logic.

use async_trait::async_trait;

use crate::domain::{
    Appointment, ClinicalHistory, Person, Pet, Record, Resource, Treatment, TreatmentControl,
    User, Veterinarian,
};
use crate::error::StorageResult;

/// Row operations for one resource table.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// List all rows ordered by id.
    async fn list(&self) -> StorageResult<Vec<Record<R>>>;

    /// Fetch one row by id.
    async fn get(&self, id: i64) -> StorageResult<Option<Record<R>>>;

    /// Insert a row and return its identifier.
    ///
    /// Tables with an allocated id strategy take the table's exclusive lock,
    /// compute `max(id) + 1` and insert in one transaction.
    async fn create(&self, fields: R) -> StorageResult<i64>;

    /// Replace all columns of an existing row.
    ///
    /// Returns `false` if the row does not exist.
    async fn update(&self, id: i64, fields: R) -> StorageResult<bool>;

    /// Delete a row.
    ///
    /// Returns `false` if the row does not exist.
    async fn delete(&self, id: i64) -> StorageResult<bool>;
}

/// Combined storage trait covering every clinic table.
#[async_trait]
pub trait Storage:
    Repository<Person>
    + Repository<User>
    + Repository<Pet>
    + Repository<Veterinarian>
    + Repository<Appointment>
    + Repository<ClinicalHistory>
    + Repository<Treatment>
    + Repository<TreatmentControl>
{
    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}

/// Trait object alias for Storage.
pub type DynStorage = dyn Storage;
