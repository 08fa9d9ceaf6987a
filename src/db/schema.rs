//! SQL DDL for initializing the history storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `expression` and `result` as entered/rendered by the calculator
/// - `created_at` stamped by the store, never client-supplied
/// - Descending index on `created_at` backing the newest-first list query
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS calculations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    expression TEXT NOT NULL,
    result TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_calculations_created_at ON calculations(created_at DESC);
"#;
