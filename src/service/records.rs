//! Record service.
//!
//! Validates input, calls the storage backend and folds every storage
//! failure into [`AppError::OperationFailed`].

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{Record, Resource};
use crate::error::{AppError, Operation, Result, StorageError};
use crate::storage::traits::{DynStorage, Repository};

/// CRUD orchestration shared by every clinic resource.
#[derive(Clone)]
pub struct RecordService {
    storage: Arc<DynStorage>,
}

impl RecordService {
    /// Create a new record service.
    #[must_use]
    pub fn new(storage: Arc<DynStorage>) -> Self {
        Self { storage }
    }

    /// List every row of `R`'s table, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` if storage fails.
    pub async fn list<R: Resource>(&self) -> Result<Vec<Record<R>>>
    where
        DynStorage: Repository<R>,
    {
        Repository::<R>::list(&*self.storage)
            .await
            .map_err(|e| failed::<R>(Operation::List, &e))
    }

    /// Fetch one row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParam` for a non-positive id, `NotFound` if the row is
    /// missing and `OperationFailed` if storage fails.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<Record<R>>
    where
        DynStorage: Repository<R>,
    {
        check_id(id)?;
        Repository::<R>::get(&*self.storage, id)
            .await
            .map_err(|e| failed::<R>(Operation::Get, &e))?
            .ok_or(AppError::NotFound {
                resource: R::TABLE,
                id,
            })
    }

    /// Insert a row and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the fields are invalid and `OperationFailed`
    /// if the insert (or identifier allocation) fails.
    pub async fn create<R: Resource>(&self, fields: R) -> Result<i64>
    where
        DynStorage: Repository<R>,
    {
        fields.validate().map_err(AppError::BadRequest)?;
        let id = Repository::<R>::create(&*self.storage, fields)
            .await
            .map_err(|e| failed::<R>(Operation::Create, &e))?;

        metrics::counter!("vetclinic_records_created_total", "table" => R::TABLE).increment(1);
        info!(table = R::TABLE, id, "Record created");
        Ok(id)
    }

    /// Replace every column of an existing row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParam`, `BadRequest`, `NotFound` or `OperationFailed`.
    pub async fn update<R: Resource>(&self, id: i64, fields: R) -> Result<()>
    where
        DynStorage: Repository<R>,
    {
        check_id(id)?;
        fields.validate().map_err(AppError::BadRequest)?;
        let updated = Repository::<R>::update(&*self.storage, id, fields)
            .await
            .map_err(|e| failed::<R>(Operation::Update, &e))?;
        if !updated {
            return Err(AppError::NotFound {
                resource: R::TABLE,
                id,
            });
        }

        info!(table = R::TABLE, id, "Record updated");
        Ok(())
    }

    /// Delete a row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParam`, `NotFound` or `OperationFailed`.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<()>
    where
        DynStorage: Repository<R>,
    {
        check_id(id)?;
        let deleted = Repository::<R>::delete(&*self.storage, id)
            .await
            .map_err(|e| failed::<R>(Operation::Delete, &e))?;
        if !deleted {
            return Err(AppError::NotFound {
                resource: R::TABLE,
                id,
            });
        }

        info!(table = R::TABLE, id, "Record deleted");
        Ok(())
    }
}

fn check_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(AppError::InvalidParam(format!("id must be positive, got {id}")));
    }
    Ok(())
}

fn failed<R: Resource>(operation: Operation, cause: &StorageError) -> AppError {
    error!(
        table = R::TABLE,
        operation = operation.as_str(),
        error = %cause,
        "Record operation failed"
    );
    metrics::counter!(
        "vetclinic_operation_failures_total",
        "table" => R::TABLE,
        "operation" => operation.as_str()
    )
    .increment(1);

    AppError::OperationFailed {
        operation,
        resource: R::TABLE,
    }
}
