//! The contract shared by every clinic resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::IdTable;

/// How a table's primary key is assigned on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// `max(id) + 1` computed under the table's advisory lock.
    Allocated(IdTable),
    /// Assigned by the storage engine (`BIGSERIAL`).
    Generated,
}

/// A resource backed by exactly one table.
///
/// Implementors are the column values of a row without its `id`; this is
/// both the request body for create/update and the payload of a
/// [`Record`].
pub trait Resource:
    Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// Table name in the schema.
    const TABLE: &'static str;

    /// Non-id columns, in bind order.
    const COLUMNS: &'static [&'static str];

    /// Primary key assignment for inserts.
    const ID_STRATEGY: IdStrategy;

    /// Check field values before they reach storage.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message naming the offending field.
    fn validate(&self) -> Result<(), String>;
}

/// A stored row: its identifier plus the resource's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Primary key.
    pub id: i64,

    /// Column values.
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    /// Create a record from an id and its fields.
    pub const fn new(id: i64, fields: T) -> Self {
        Self { id, fields }
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be blank"));
    }
    Ok(())
}

pub(crate) fn require_id(field: &str, value: i64) -> Result<(), String> {
    if value <= 0 {
        return Err(format!("{field} must be a positive id"));
    }
    Ok(())
}

pub(crate) fn optional_id(field: &str, value: Option<i64>) -> Result<(), String> {
    value.map_or(Ok(()), |id| require_id(field, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("nombre", "Firulais").is_ok());
        assert_eq!(
            require_text("nombre", "   ").unwrap_err(),
            "nombre cannot be blank"
        );
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("persona_id", 1).is_ok());
        assert!(require_id("persona_id", 0).is_err());
        assert!(require_id("persona_id", -3).is_err());
        assert!(optional_id("cita_id", None).is_ok());
        assert!(optional_id("cita_id", Some(0)).is_err());
    }
}
