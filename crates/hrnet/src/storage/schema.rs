//! `SQLite` schema definitions for hrnet.
//!
//! The database is a plain key/value store: one row per key, string values.

/// SQL statement to create the key/value items table.
pub const CREATE_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS items (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_ITEMS_TABLE, CREATE_METADATA_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_items_table_contains_required_columns() {
        assert!(CREATE_ITEMS_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_ITEMS_TABLE.contains("value TEXT NOT NULL"));
        assert!(CREATE_ITEMS_TABLE.contains("updated_at TEXT NOT NULL"));
    }
}
