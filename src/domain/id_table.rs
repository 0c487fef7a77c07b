//! Registry of tables whose identifiers are allocated by the service.
//!
//! Every table listed here owns an independent numbering sequence and one
//! advisory lock key. Keys must stay pairwise distinct: sharing a key across
//! tables serializes unrelated inserts, and giving one table two keys breaks
//! mutual exclusion.

use std::fmt;

/// Integer key of a transaction-scoped advisory lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LockKey(i64);

impl LockKey {
    /// Raw key value as passed to the database.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table whose primary key is assigned as `max(id) + 1` under a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdTable {
    Persona,
    Mascota,
    Usuario,
    Veterinario,
}

impl IdTable {
    /// All registered tables.
    pub const ALL: [Self; 4] = [Self::Persona, Self::Mascota, Self::Usuario, Self::Veterinario];

    /// Advisory lock key guarding this table's sequence.
    ///
    /// 1002 is left unassigned; it belonged to `cita` before appointments
    /// moved to database-generated identifiers.
    #[must_use]
    pub const fn lock_key(self) -> LockKey {
        match self {
            Self::Persona => LockKey(1001),
            Self::Mascota => LockKey(1003),
            Self::Usuario => LockKey(1004),
            Self::Veterinario => LockKey(1005),
        }
    }

    /// Name of the table in the schema.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Persona => "persona",
            Self::Mascota => "mascota",
            Self::Usuario => "usuario",
            Self::Veterinario => "veterinario",
        }
    }
}

impl fmt::Display for IdTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_lock_keys_are_distinct() {
        let keys: HashSet<LockKey> = IdTable::ALL.iter().map(|t| t.lock_key()).collect();
        assert_eq!(keys.len(), IdTable::ALL.len());
    }

    #[test]
    fn test_table_names_are_distinct() {
        let names: HashSet<&str> = IdTable::ALL.iter().map(|t| t.table_name()).collect();
        assert_eq!(names.len(), IdTable::ALL.len());
    }

    #[test]
    fn test_known_keys() {
        assert_eq!(IdTable::Persona.lock_key().as_i64(), 1001);
        assert_eq!(IdTable::Mascota.lock_key().as_i64(), 1003);
        assert_eq!(IdTable::Usuario.lock_key().as_i64(), 1004);
        assert_eq!(IdTable::Veterinario.lock_key().as_i64(), 1005);
    }
}
