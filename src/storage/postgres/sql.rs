//! SQL text for single-table record statements.
//!
//! Table and column names come from compile-time constants on each
//! resource, never from request data.

/// `SELECT id, <cols> FROM <table> ORDER BY id`
pub fn select_all(table: &str, columns: &[&str]) -> String {
    format!("SELECT id, {} FROM {table} ORDER BY id", columns.join(", "))
}

/// `SELECT id, <cols> FROM <table> WHERE id = $1`
pub fn select_by_id(table: &str, columns: &[&str]) -> String {
    format!("SELECT id, {} FROM {table} WHERE id = $1", columns.join(", "))
}

/// Existence check that also locks the row for the rest of the transaction.
pub fn lock_row(table: &str) -> String {
    format!("SELECT id FROM {table} WHERE id = $1 FOR UPDATE")
}

/// Insert with an explicit id bound as `$1`.
pub fn insert_with_id(table: &str, columns: &[&str]) -> String {
    format!(
        "INSERT INTO {table} (id, {}) VALUES ({})",
        columns.join(", "),
        placeholders(1, columns.len() + 1)
    )
}

/// Insert letting the database assign the id.
pub fn insert_returning_id(table: &str, columns: &[&str]) -> String {
    format!(
        "INSERT INTO {table} ({}) VALUES ({}) RETURNING id",
        columns.join(", "),
        placeholders(1, columns.len())
    )
}

/// Full-row update; the id is bound after the columns.
pub fn update_by_id(table: &str, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {table} SET {assignments} WHERE id = ${}",
        columns.len() + 1
    )
}

/// `DELETE FROM <table> WHERE id = $1`
pub fn delete_by_id(table: &str) -> String {
    format!("DELETE FROM {table} WHERE id = $1")
}

/// Current maximum id, `NULL` for an empty table.
pub fn max_id(table: &str) -> String {
    format!("SELECT MAX(id) FROM {table}")
}

fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
